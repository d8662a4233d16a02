pub mod hart;

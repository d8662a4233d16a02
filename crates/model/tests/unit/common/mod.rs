pub mod xlen;

use std::path::Path;

use object::elf;
use object::write::elf::{FileHeader, ProgramHeader, Sym, Writer};
use object::Endianness;

/// Base of data memory in the default memory map.
pub const DMEM: u64 = 0x8000_0000;
/// Signature base used by the generated images.
pub const SIG_BEGIN: u64 = DMEM + 0x1000;
/// Dispatcher entry used by the generated images.
pub const HANDLER: u64 = 0x100;

/// A 32-bit RISC-V executable with one data segment and absolute symbols.
#[derive(Debug, Clone)]
pub struct ImageSpec {
    pub segment_addr: u64,
    pub data: Vec<u8>,
    pub symbols: Vec<(&'static str, u64)>,
}

impl ImageSpec {
    /// Signature of `words` at [`SIG_BEGIN`], bounded by the usual symbols.
    pub fn with_signature(words: &[u32]) -> Self {
        let data: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        let end = SIG_BEGIN + data.len() as u64;
        Self {
            segment_addr: SIG_BEGIN,
            data,
            symbols: vec![("begin_signature", SIG_BEGIN), ("end_signature", end)],
        }
    }

    pub fn symbol(mut self, name: &'static str, addr: u64) -> Self {
        self.symbols.push((name, addr));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut writer = Writer::new(Endianness::Little, false, &mut buffer);

        writer.reserve_file_header();
        writer.reserve_program_headers(1);

        let _ = writer.reserve_null_section_index();
        let _ = writer.reserve_symtab_section_index();
        let _ = writer.reserve_strtab_section_index();
        let _ = writer.reserve_shstrtab_section_index();

        let names: Vec<_> = self
            .symbols
            .iter()
            .map(|(name, _)| writer.add_string(name.as_bytes()))
            .collect();
        let _ = writer.reserve_null_symbol_index();
        for _ in &self.symbols {
            let _ = writer.reserve_symbol_index(None);
        }

        let data_offset = writer.reserve(self.data.len(), 4);
        writer.reserve_symtab();
        writer.reserve_strtab();
        writer.reserve_shstrtab();
        writer.reserve_section_headers();

        writer
            .write_file_header(&FileHeader {
                os_abi: elf::ELFOSABI_NONE,
                abi_version: 0,
                e_type: elf::ET_EXEC,
                e_machine: elf::EM_RISCV,
                e_entry: 0,
                e_flags: 0,
            })
            .unwrap();

        let len = self.data.len() as u64;
        writer.write_program_header(&ProgramHeader {
            p_type: elf::PT_LOAD,
            p_flags: elf::PF_R | elf::PF_W,
            p_offset: data_offset as u64,
            p_vaddr: self.segment_addr,
            p_paddr: self.segment_addr,
            p_filesz: len,
            p_memsz: len,
            p_align: 4,
        });

        writer.write_align(4);
        writer.write(&self.data);

        writer.write_null_symbol();
        for (name, (_, addr)) in names.iter().zip(&self.symbols) {
            writer.write_symbol(&Sym {
                name: Some(*name),
                section: None,
                st_info: (elf::STB_GLOBAL << 4) | elf::STT_NOTYPE,
                st_other: elf::STV_DEFAULT,
                st_shndx: elf::SHN_ABS,
                st_value: *addr,
                st_size: 0,
            });
        }
        writer.write_strtab();
        writer.write_shstrtab();

        writer.write_null_section_header();
        writer.write_symtab_section_header(1);
        writer.write_strtab_section_header();
        writer.write_shstrtab_section_header();

        assert_eq!(writer.reserved_len(), writer.len());
        buffer
    }

    /// Writes the image to `dir/name` and returns its path as a CLI argument.
    pub fn write_to(&self, dir: &Path, name: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, self.build()).unwrap();
        path.display().to_string()
    }
}

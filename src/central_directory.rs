//! Central-directory writer (C8): emits the central-directory entries,
//! ZIP64 EOCD, ZIP64 locator, and classic EOCD for everything recorded in
//! an [`EntryStore`].

use std::io::{self, Write};

use crate::counting_writer::CountingWriter;
use crate::entry_store::EntryStore;
use crate::zip_records::{
    CentralDirFixed, EocdFixed, Zip64EocdFixed, Zip64LocatorFixed, CENTRAL_DIRECTORY_HEADER_SIGNATURE,
    EOCD_SIGNATURE, ZIP64_EOCD_LOCATOR_SIGNATURE, ZIP64_EOCD_SIGNATURE, ZIP64_EXTRA_ID,
};

/// The engine-compatibility knob from §6: *strict* restates both sizes plus
/// the offset in the central directory's own ZIP64 extra and writes a
/// non-empty archive comment; *engine-compatible* (the default) writes only
/// the offset and an empty comment, because the navigation engine is known
/// to mishandle richer extras and any comment at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompatMode {
    Strict,
    EngineCompatible,
}

impl CompatMode {
    pub const fn current() -> Self {
        if cfg!(feature = "strict") {
            CompatMode::Strict
        } else {
            CompatMode::EngineCompatible
        }
    }

    fn encode_cd_zip64_extra(self, uncompressed_size: u64, compressed_size: u64, offset: u64) -> Vec<u8> {
        match self {
            CompatMode::Strict => {
                let mut out = Vec::with_capacity(28);
                out.extend_from_slice(&ZIP64_EXTRA_ID.to_le_bytes());
                out.extend_from_slice(&24u16.to_le_bytes());
                out.extend_from_slice(&uncompressed_size.to_le_bytes());
                out.extend_from_slice(&compressed_size.to_le_bytes());
                out.extend_from_slice(&offset.to_le_bytes());
                out
            }
            CompatMode::EngineCompatible => {
                let mut out = Vec::with_capacity(12);
                out.extend_from_slice(&ZIP64_EXTRA_ID.to_le_bytes());
                out.extend_from_slice(&8u16.to_le_bytes());
                out.extend_from_slice(&offset.to_le_bytes());
                out
            }
        }
    }

    fn archive_comment(self) -> &'static [u8] {
        match self {
            CompatMode::Strict => b"clipped by binfile-clip",
            CompatMode::EngineCompatible => b"",
        }
    }
}

/// Writes the full central-directory section (entries + ZIP64 EOCD +
/// ZIP64 locator + classic EOCD) for `store` to `writer`, using `mode` to
/// decide the central-directory ZIP64 extra's shape and the archive
/// comment.
pub fn write_central_directory<W: Write>(
    writer: &mut CountingWriter<W>,
    store: &EntryStore,
    mode: CompatMode,
) -> io::Result<()> {
    let central_directory_offset = writer.written();

    for entry in store {
        let extra = mode.encode_cd_zip64_extra(entry.uncompressed_size, entry.compressed_size, entry.offset);

        let fixed = CentralDirFixed {
            version_made_by: 0x031e,
            version_needed_to_extract: 0x002d,
            general_purpose_bit_flag: entry.header.general_purpose_bit_flag,
            compression_method: entry.header.compression_method,
            last_mod_file_time: entry.header.last_mod_file_time,
            last_mod_file_date: entry.header.last_mod_file_date,
            crc32: entry.header.crc32,
            compressed_size: 0xFFFF_FFFF,
            uncompressed_size: 0xFFFF_FFFF,
            file_name_length: entry.file_name.len() as u16,
            extra_field_length: extra.len() as u16,
            file_comment_length: 0,
            disk_number_start: 0,
            internal_file_attributes: 0,
            external_file_attributes: 0,
            relative_offset_of_local_header: 0xFFFF_FFFF,
        };

        writer.write_all(&CENTRAL_DIRECTORY_HEADER_SIGNATURE.to_le_bytes())?;
        writer.write_all(&fixed.encode())?;
        writer.write_all(&entry.file_name)?;
        writer.write_all(&extra)?;
    }

    let central_directory_size = writer.written() - central_directory_offset;
    let zip64_eocd_offset = writer.written();

    let zip64_eocd = Zip64EocdFixed {
        size_of_zip64_eocd_record: Zip64EocdFixed::TRAILING_SIZE,
        version_made_by: 0x031e,
        version_needed_to_extract: 0x002d,
        number_of_this_disk: 0,
        number_of_disk_with_cd_start: 0,
        total_entries_this_disk: store.len() as u64,
        total_entries: store.len() as u64,
        central_directory_size,
        central_directory_offset,
    };
    writer.write_all(&ZIP64_EOCD_SIGNATURE.to_le_bytes())?;
    writer.write_all(&zip64_eocd.encode())?;

    let locator = Zip64LocatorFixed {
        number_of_disk_with_zip64_eocd: 0,
        relative_offset_of_zip64_eocd: zip64_eocd_offset,
        total_number_of_disks: 1,
    };
    writer.write_all(&ZIP64_EOCD_LOCATOR_SIGNATURE.to_le_bytes())?;
    writer.write_all(&locator.encode())?;

    let comment = mode.archive_comment();
    let eocd = EocdFixed {
        number_of_this_disk: 0,
        number_of_disk_with_cd_start: 0,
        total_entries_this_disk: 0xFFFF,
        total_entries: 0xFFFF,
        central_directory_size: 0xFFFF_FFFF,
        central_directory_offset: 0xFFFF_FFFF,
        file_comment_length: comment.len() as u16,
    };
    writer.write_all(&EOCD_SIGNATURE.to_le_bytes())?;
    writer.write_all(&eocd.encode())?;
    writer.write_all(comment)?;

    Ok(())
}

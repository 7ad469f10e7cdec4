//! Packed ZIP/ZIP64 on-the-wire record layouts (C4).
//!
//! Every record here is little-endian and unpadded, matching PKWARE's
//! APPNOTE.TXT. None of this is represented with `#[repr(packed)]` plus a
//! pointer cast — every record gets an explicit `decode`/`encode` pair
//! built from `from_le_bytes`/`to_le_bytes`, so there is never a risk of
//! misaligned reads or platform-dependent struct padding.

pub const LOCAL_FILE_HEADER_SIGNATURE: u32 = 0x0403_4b50;
pub const CENTRAL_DIRECTORY_HEADER_SIGNATURE: u32 = 0x0201_4b50;
pub const ZIP64_EOCD_SIGNATURE: u32 = 0x0606_4b50;
pub const ZIP64_EOCD_LOCATOR_SIGNATURE: u32 = 0x0706_4b50;
pub const EOCD_SIGNATURE: u32 = 0x0605_4b50;

pub const ZIP64_EXTRA_ID: u16 = 0x0001;

/// The fixed part of a local file header, after the 4-byte signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalHeaderFixed {
    pub version_needed_to_extract: u16,
    pub general_purpose_bit_flag: u16,
    pub compression_method: u16,
    pub last_mod_file_time: u16,
    pub last_mod_file_date: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name_length: u16,
    pub extra_field_length: u16,
}

impl LocalHeaderFixed {
    pub const SIZE: usize = 26;

    pub fn decode(b: &[u8]) -> Self {
        assert!(b.len() >= Self::SIZE);
        Self {
            version_needed_to_extract: u16::from_le_bytes([b[0], b[1]]),
            general_purpose_bit_flag: u16::from_le_bytes([b[2], b[3]]),
            compression_method: u16::from_le_bytes([b[4], b[5]]),
            last_mod_file_time: u16::from_le_bytes([b[6], b[7]]),
            last_mod_file_date: u16::from_le_bytes([b[8], b[9]]),
            crc32: u32::from_le_bytes([b[10], b[11], b[12], b[13]]),
            compressed_size: u32::from_le_bytes([b[14], b[15], b[16], b[17]]),
            uncompressed_size: u32::from_le_bytes([b[18], b[19], b[20], b[21]]),
            file_name_length: u16::from_le_bytes([b[22], b[23]]),
            extra_field_length: u16::from_le_bytes([b[24], b[25]]),
        }
    }

    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..2].copy_from_slice(&self.version_needed_to_extract.to_le_bytes());
        out[2..4].copy_from_slice(&self.general_purpose_bit_flag.to_le_bytes());
        out[4..6].copy_from_slice(&self.compression_method.to_le_bytes());
        out[6..8].copy_from_slice(&self.last_mod_file_time.to_le_bytes());
        out[8..10].copy_from_slice(&self.last_mod_file_date.to_le_bytes());
        out[10..14].copy_from_slice(&self.crc32.to_le_bytes());
        out[14..18].copy_from_slice(&self.compressed_size.to_le_bytes());
        out[18..22].copy_from_slice(&self.uncompressed_size.to_le_bytes());
        out[22..24].copy_from_slice(&self.file_name_length.to_le_bytes());
        out[24..26].copy_from_slice(&self.extra_field_length.to_le_bytes());
        out
    }
}

/// The fixed part of a central-directory header, after the 4-byte signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CentralDirFixed {
    pub version_made_by: u16,
    pub version_needed_to_extract: u16,
    pub general_purpose_bit_flag: u16,
    pub compression_method: u16,
    pub last_mod_file_time: u16,
    pub last_mod_file_date: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name_length: u16,
    pub extra_field_length: u16,
    pub file_comment_length: u16,
    pub disk_number_start: u16,
    pub internal_file_attributes: u16,
    pub external_file_attributes: u32,
    pub relative_offset_of_local_header: u32,
}

impl CentralDirFixed {
    pub const SIZE: usize = 42;

    pub fn decode(b: &[u8]) -> Self {
        assert!(b.len() >= Self::SIZE);
        Self {
            version_made_by: u16::from_le_bytes([b[0], b[1]]),
            version_needed_to_extract: u16::from_le_bytes([b[2], b[3]]),
            general_purpose_bit_flag: u16::from_le_bytes([b[4], b[5]]),
            compression_method: u16::from_le_bytes([b[6], b[7]]),
            last_mod_file_time: u16::from_le_bytes([b[8], b[9]]),
            last_mod_file_date: u16::from_le_bytes([b[10], b[11]]),
            crc32: u32::from_le_bytes([b[12], b[13], b[14], b[15]]),
            compressed_size: u32::from_le_bytes([b[16], b[17], b[18], b[19]]),
            uncompressed_size: u32::from_le_bytes([b[20], b[21], b[22], b[23]]),
            file_name_length: u16::from_le_bytes([b[24], b[25]]),
            extra_field_length: u16::from_le_bytes([b[26], b[27]]),
            file_comment_length: u16::from_le_bytes([b[28], b[29]]),
            disk_number_start: u16::from_le_bytes([b[30], b[31]]),
            internal_file_attributes: u16::from_le_bytes([b[32], b[33]]),
            external_file_attributes: u32::from_le_bytes([b[34], b[35], b[36], b[37]]),
            relative_offset_of_local_header: u32::from_le_bytes([b[38], b[39], b[40], b[41]]),
        }
    }

    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..2].copy_from_slice(&self.version_made_by.to_le_bytes());
        out[2..4].copy_from_slice(&self.version_needed_to_extract.to_le_bytes());
        out[4..6].copy_from_slice(&self.general_purpose_bit_flag.to_le_bytes());
        out[6..8].copy_from_slice(&self.compression_method.to_le_bytes());
        out[8..10].copy_from_slice(&self.last_mod_file_time.to_le_bytes());
        out[10..12].copy_from_slice(&self.last_mod_file_date.to_le_bytes());
        out[12..16].copy_from_slice(&self.crc32.to_le_bytes());
        out[16..20].copy_from_slice(&self.compressed_size.to_le_bytes());
        out[20..24].copy_from_slice(&self.uncompressed_size.to_le_bytes());
        out[24..26].copy_from_slice(&self.file_name_length.to_le_bytes());
        out[26..28].copy_from_slice(&self.extra_field_length.to_le_bytes());
        out[28..30].copy_from_slice(&self.file_comment_length.to_le_bytes());
        out[30..32].copy_from_slice(&self.disk_number_start.to_le_bytes());
        out[32..34].copy_from_slice(&self.internal_file_attributes.to_le_bytes());
        out[34..38].copy_from_slice(&self.external_file_attributes.to_le_bytes());
        out[38..42].copy_from_slice(&self.relative_offset_of_local_header.to_le_bytes());
        out
    }
}

/// The fixed part of the ZIP64 end-of-central-directory record, after the
/// 4-byte signature (this includes `size_of_zip64_eocd_record` itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zip64EocdFixed {
    pub size_of_zip64_eocd_record: u64,
    pub version_made_by: u16,
    pub version_needed_to_extract: u16,
    pub number_of_this_disk: u32,
    pub number_of_disk_with_cd_start: u32,
    pub total_entries_this_disk: u64,
    pub total_entries: u64,
    pub central_directory_size: u64,
    pub central_directory_offset: u64,
}

impl Zip64EocdFixed {
    pub const SIZE: usize = 52;
    /// Bytes of fixed record that follow `size_of_zip64_eocd_record`
    /// itself — what that field's value must equal.
    pub const TRAILING_SIZE: u64 = (Self::SIZE - 8) as u64;

    pub fn decode(b: &[u8]) -> Self {
        assert!(b.len() >= Self::SIZE);
        Self {
            size_of_zip64_eocd_record: u64::from_le_bytes(b[0..8].try_into().unwrap()),
            version_made_by: u16::from_le_bytes([b[8], b[9]]),
            version_needed_to_extract: u16::from_le_bytes([b[10], b[11]]),
            number_of_this_disk: u32::from_le_bytes([b[12], b[13], b[14], b[15]]),
            number_of_disk_with_cd_start: u32::from_le_bytes([b[16], b[17], b[18], b[19]]),
            total_entries_this_disk: u64::from_le_bytes(b[20..28].try_into().unwrap()),
            total_entries: u64::from_le_bytes(b[28..36].try_into().unwrap()),
            central_directory_size: u64::from_le_bytes(b[36..44].try_into().unwrap()),
            central_directory_offset: u64::from_le_bytes(b[44..52].try_into().unwrap()),
        }
    }

    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..8].copy_from_slice(&self.size_of_zip64_eocd_record.to_le_bytes());
        out[8..10].copy_from_slice(&self.version_made_by.to_le_bytes());
        out[10..12].copy_from_slice(&self.version_needed_to_extract.to_le_bytes());
        out[12..16].copy_from_slice(&self.number_of_this_disk.to_le_bytes());
        out[16..20].copy_from_slice(&self.number_of_disk_with_cd_start.to_le_bytes());
        out[20..28].copy_from_slice(&self.total_entries_this_disk.to_le_bytes());
        out[28..36].copy_from_slice(&self.total_entries.to_le_bytes());
        out[36..44].copy_from_slice(&self.central_directory_size.to_le_bytes());
        out[44..52].copy_from_slice(&self.central_directory_offset.to_le_bytes());
        out
    }
}

/// The ZIP64 end-of-central-directory locator, after the 4-byte signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zip64LocatorFixed {
    pub number_of_disk_with_zip64_eocd: u32,
    pub relative_offset_of_zip64_eocd: u64,
    pub total_number_of_disks: u32,
}

impl Zip64LocatorFixed {
    pub const SIZE: usize = 16;

    pub fn decode(b: &[u8]) -> Self {
        assert!(b.len() >= Self::SIZE);
        Self {
            number_of_disk_with_zip64_eocd: u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            relative_offset_of_zip64_eocd: u64::from_le_bytes(b[4..12].try_into().unwrap()),
            total_number_of_disks: u32::from_le_bytes([b[12], b[13], b[14], b[15]]),
        }
    }

    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..4].copy_from_slice(&self.number_of_disk_with_zip64_eocd.to_le_bytes());
        out[4..12].copy_from_slice(&self.relative_offset_of_zip64_eocd.to_le_bytes());
        out[12..16].copy_from_slice(&self.total_number_of_disks.to_le_bytes());
        out
    }
}

/// The classic (32-bit) end-of-central-directory record, after the 4-byte
/// signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EocdFixed {
    pub number_of_this_disk: u16,
    pub number_of_disk_with_cd_start: u16,
    pub total_entries_this_disk: u16,
    pub total_entries: u16,
    pub central_directory_size: u32,
    pub central_directory_offset: u32,
    pub file_comment_length: u16,
}

impl EocdFixed {
    pub const SIZE: usize = 18;

    pub fn decode(b: &[u8]) -> Self {
        assert!(b.len() >= Self::SIZE);
        Self {
            number_of_this_disk: u16::from_le_bytes([b[0], b[1]]),
            number_of_disk_with_cd_start: u16::from_le_bytes([b[2], b[3]]),
            total_entries_this_disk: u16::from_le_bytes([b[4], b[5]]),
            total_entries: u16::from_le_bytes([b[6], b[7]]),
            central_directory_size: u32::from_le_bytes([b[8], b[9], b[10], b[11]]),
            central_directory_offset: u32::from_le_bytes([b[12], b[13], b[14], b[15]]),
            file_comment_length: u16::from_le_bytes([b[16], b[17]]),
        }
    }

    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..2].copy_from_slice(&self.number_of_this_disk.to_le_bytes());
        out[2..4].copy_from_slice(&self.number_of_disk_with_cd_start.to_le_bytes());
        out[4..6].copy_from_slice(&self.total_entries_this_disk.to_le_bytes());
        out[6..8].copy_from_slice(&self.total_entries.to_le_bytes());
        out[8..12].copy_from_slice(&self.central_directory_size.to_le_bytes());
        out[12..16].copy_from_slice(&self.central_directory_offset.to_le_bytes());
        out[16..18].copy_from_slice(&self.file_comment_length.to_le_bytes());
        out
    }
}

/// A ZIP64 extra-field record as it appears inside a *local* file header's
/// extra area in this format: unlike the PKWARE-standard local extra (which
/// only restates the two sizes), this navigation engine's local headers
/// always carry the full payload — both sizes, the eventual local-header
/// offset, and a disk number — at fixed positions, regardless of the
/// declared `data_size`. This mirrors the archive format's own
/// `zip64_extended_information_t`, reused verbatim for local and central
/// records alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zip64Extra {
    pub uncompressed_size: u64,
    pub compressed_size: u64,
    pub offset: u64,
    pub disk_nr: u32,
}

impl Zip64Extra {
    /// Total on-wire size of a local-header ZIP64 extra record, including
    /// its 4-byte `(id, data_size)` prefix.
    pub const FULL_SIZE: usize = 32;
    /// Size of the payload only (what `data_size` *should* declare).
    pub const PAYLOAD_SIZE: u16 = 28;

    /// Decodes a full record (4-byte id/data_size prefix plus payload).
    /// `b` must be at least [`Self::FULL_SIZE`] bytes — local headers in
    /// this format never carry a short-form ZIP64 extra.
    pub fn decode_record(b: &[u8]) -> Self {
        assert!(b.len() >= Self::FULL_SIZE);
        Self {
            uncompressed_size: u64::from_le_bytes(b[4..12].try_into().unwrap()),
            compressed_size: u64::from_le_bytes(b[12..20].try_into().unwrap()),
            offset: u64::from_le_bytes(b[20..28].try_into().unwrap()),
            disk_nr: u32::from_le_bytes(b[28..32].try_into().unwrap()),
        }
    }

    /// Overwrites the payload fields of a full record in place, leaving the
    /// `(id, data_size)` prefix and `disk_nr` untouched.
    pub fn patch_sizes_and_offset(b: &mut [u8], uncompressed_size: u64, compressed_size: u64, offset: u64) {
        assert!(b.len() >= Self::FULL_SIZE);
        b[4..12].copy_from_slice(&uncompressed_size.to_le_bytes());
        b[12..20].copy_from_slice(&compressed_size.to_le_bytes());
        b[20..28].copy_from_slice(&offset.to_le_bytes());
    }
}

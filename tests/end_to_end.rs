//! End-to-end coverage assembling synthetic ZIP64 archives byte-by-byte and
//! driving them through the full rewrite + central-directory pipeline, the
//! way a caller actually uses this crate: stdin bytes in, stdout bytes out.

use std::io::Cursor;

use binfile_clip::central_directory::{write_central_directory, CompatMode};
use binfile_clip::counting_writer::CountingWriter;
use binfile_clip::geometry::{Point, Rect, WORLD};
use binfile_clip::rewriter::rewrite;
use binfile_clip::zip_records::{
    CentralDirFixed, EocdFixed, LocalHeaderFixed, Zip64EocdFixed, Zip64Extra, Zip64LocatorFixed,
    CENTRAL_DIRECTORY_HEADER_SIGNATURE, EOCD_SIGNATURE, LOCAL_FILE_HEADER_SIGNATURE, ZIP64_EXTRA_ID,
};

fn local_entry(name: &[u8], payload: &[u8], crc32: u32) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&LOCAL_FILE_HEADER_SIGNATURE.to_le_bytes());
    let fixed = LocalHeaderFixed {
        version_needed_to_extract: 20,
        general_purpose_bit_flag: 0,
        compression_method: 0,
        last_mod_file_time: 0,
        last_mod_file_date: 0,
        crc32,
        compressed_size: payload.len() as u32,
        uncompressed_size: payload.len() as u32,
        file_name_length: name.len() as u16,
        extra_field_length: 0,
    };
    out.extend_from_slice(&fixed.encode());
    out.extend_from_slice(name);
    out.extend_from_slice(payload);
    out
}

/// Builds a local entry whose sizes are declared via a ZIP64 extra rather
/// than the 32-bit header fields, mirroring S5.
fn local_entry_zip64(name: &[u8], payload: &[u8], crc32: u32) -> Vec<u8> {
    let mut extra = Vec::with_capacity(Zip64Extra::FULL_SIZE);
    extra.extend_from_slice(&ZIP64_EXTRA_ID.to_le_bytes());
    extra.extend_from_slice(&Zip64Extra::PAYLOAD_SIZE.to_le_bytes());
    extra.extend_from_slice(&(payload.len() as u64).to_le_bytes()); // uncompressed
    extra.extend_from_slice(&(payload.len() as u64).to_le_bytes()); // compressed
    extra.extend_from_slice(&0u64.to_le_bytes()); // offset, rewritten by the rewriter
    extra.extend_from_slice(&0u32.to_le_bytes()); // disk_nr

    let mut out = Vec::new();
    out.extend_from_slice(&LOCAL_FILE_HEADER_SIGNATURE.to_le_bytes());
    let fixed = LocalHeaderFixed {
        version_needed_to_extract: 45,
        general_purpose_bit_flag: 0,
        compression_method: 0,
        last_mod_file_time: 0,
        last_mod_file_date: 0,
        crc32,
        compressed_size: 0xFFFF_FFFF,
        uncompressed_size: 0xFFFF_FFFF,
        file_name_length: name.len() as u16,
        extra_field_length: extra.len() as u16,
    };
    out.extend_from_slice(&fixed.encode());
    out.extend_from_slice(name);
    out.extend_from_slice(&extra);
    out.extend_from_slice(payload);
    out
}

fn find_signature(bytes: &[u8], signature: u32) -> usize {
    let needle = signature.to_le_bytes();
    bytes
        .windows(4)
        .position(|w| w == needle)
        .expect("signature not found in output")
}

/// Runs `input` through the full rewrite + central-directory pipeline and
/// returns the assembled output bytes, mirroring what `main.rs` does with
/// stdin/stdout.
fn run_pipeline(input: Vec<u8>, query: &Rect) -> Vec<u8> {
    let mut cursor = Cursor::new(input);
    let mut writer = CountingWriter::new(Vec::new());
    let store = rewrite(&mut cursor, &mut writer, query).unwrap();
    write_central_directory(&mut writer, &store, CompatMode::EngineCompatible).unwrap();
    writer.into_inner()
}

#[test]
fn s1_null_query_over_world_keeps_all_members_bit_identical() {
    let members: &[(&[u8], &[u8], u32)] =
        &[(b"", &[9], 0x1111), (b"a", &[1, 2], 0x2222), (b"ad", &[3], 0x3333), (b"ddd", &[], 0x4444)];
    let mut input = Vec::new();
    for (name, payload, crc) in members {
        input.extend_from_slice(&local_entry(name, payload, *crc));
    }

    let output = run_pipeline(input, &WORLD);

    let cd_start = find_signature(&output, CENTRAL_DIRECTORY_HEADER_SIGNATURE);
    let eocd_start = find_signature(&output, EOCD_SIGNATURE);
    let eocd = EocdFixed::decode(&output[eocd_start + 4..]);
    assert_eq!(eocd.total_entries, 0xFFFF); // ZIP64, per the locator.
    assert!(cd_start > 0, "local entries must precede the central directory");

    // Every local payload survives bit-for-bit in input order.
    let mut local_offset = 0usize;
    for (name, payload, crc) in members {
        assert_eq!(&output[local_offset..local_offset + 4], &LOCAL_FILE_HEADER_SIGNATURE.to_le_bytes());
        let fixed = LocalHeaderFixed::decode(&output[local_offset + 4..]);
        assert_eq!(fixed.crc32, *crc);
        assert_eq!(fixed.compressed_size as usize, payload.len());
        let name_start = local_offset + 4 + LocalHeaderFixed::SIZE;
        let payload_start = name_start + name.len();
        assert_eq!(&output[name_start..payload_start], *name);
        assert_eq!(&output[payload_start..payload_start + payload.len()], *payload);
        local_offset = payload_start + payload.len();
    }
    assert_eq!(local_offset, cd_start);
}

#[test]
fn s2_corner_query_blanks_non_intersecting_tile_in_full_archive() {
    let input = local_entry(b"a", &[0xAA; 1000], 0xDEAD_BEEF);
    let query = Rect::new(Point::new(10_000_000, 10_000_000), Point::new(11_000_000, 11_000_000));

    let output = run_pipeline(input, &query);

    assert_eq!(&output[0..4], &LOCAL_FILE_HEADER_SIGNATURE.to_le_bytes());
    let fixed = LocalHeaderFixed::decode(&output[4..]);
    assert_eq!(fixed.compressed_size, 0);
    assert_eq!(fixed.crc32, 0);
    assert_eq!(fixed.compression_method, 0);

    let cd_start = find_signature(&output, CENTRAL_DIRECTORY_HEADER_SIGNATURE);
    let cd_fixed = CentralDirFixed::decode(&output[cd_start + 4..]);
    assert_eq!(cd_fixed.relative_offset_of_local_header, 0xFFFF_FFFF);
}

#[test]
fn s5_zip64_extra_offset_and_size_round_trip_through_rewrite_and_central_directory() {
    let payload = vec![0x42u8; 5000];
    let mut input = Vec::new();
    input.extend_from_slice(&local_entry(b"a", &[1], 0x1)); // pushes the ZIP64 member off offset 0
    input.extend_from_slice(&local_entry_zip64(b"d", &payload, 0xCAFE_BABE));

    let output = run_pipeline(input, &WORLD);

    let second_local_offset = 4 + LocalHeaderFixed::SIZE + 1 + 1; // sig + fixed + name "a" + payload [1]
    assert_eq!(
        &output[second_local_offset..second_local_offset + 4],
        &LOCAL_FILE_HEADER_SIGNATURE.to_le_bytes()
    );
    let fixed = LocalHeaderFixed::decode(&output[second_local_offset + 4..]);
    assert_eq!(fixed.compressed_size, 0xFFFF_FFFF);
    assert_eq!(fixed.uncompressed_size, 0xFFFF_FFFF);

    let extra_start =
        second_local_offset + 4 + LocalHeaderFixed::SIZE + fixed.file_name_length as usize;
    let extra_bytes = &output[extra_start..extra_start + Zip64Extra::FULL_SIZE];
    let decoded = Zip64Extra::decode_record(extra_bytes);
    assert_eq!(decoded.compressed_size, payload.len() as u64);
    assert_eq!(decoded.uncompressed_size, payload.len() as u64);
    assert_eq!(decoded.offset, second_local_offset as u64);

    // The central directory's own ZIP64 extra for this entry must carry the
    // same size.
    let cd_start = find_signature(&output, CENTRAL_DIRECTORY_HEADER_SIGNATURE);
    let second_cd_start = cd_start
        + 4
        + CentralDirFixed::SIZE
        + 1 // "a"'s file_name_length
        + CentralDirFixed::decode(&output[cd_start + 4..]).extra_field_length as usize;
    assert_eq!(
        &output[second_cd_start..second_cd_start + 4],
        &CENTRAL_DIRECTORY_HEADER_SIGNATURE.to_le_bytes()
    );
    let second_cd_fixed = CentralDirFixed::decode(&output[second_cd_start + 4..]);
    assert_eq!(second_cd_fixed.compressed_size, 0xFFFF_FFFF);
    let second_cd_extra_start = second_cd_start + 4 + CentralDirFixed::SIZE + second_cd_fixed.file_name_length as usize;
    // Engine-compatible mode: an 8-byte offset-only payload.
    assert_eq!(
        u16::from_le_bytes([output[second_cd_extra_start + 2], output[second_cd_extra_start + 3]]),
        8
    );
}

#[test]
fn s6_projection_feeds_cli_coordinates_into_the_query_rect_used_by_rewrite() {
    let query = binfile_clip::projection::project(11.3, 47.9, 11.7, 48.2);
    let input = local_entry(b"a", &[1, 2, 3], 0x9);
    let output = run_pipeline(input, &query);

    // Munich is nowhere near the "a" quadrant's southwest corner of the
    // world, so the single member is blanked end to end.
    let fixed = LocalHeaderFixed::decode(&output[4..]);
    assert_eq!(fixed.compressed_size, 0);
}

#[test]
fn zip64_eocd_and_locator_are_consistent_with_the_written_central_directory() {
    let mut input = Vec::new();
    input.extend_from_slice(&local_entry(b"a", &[1, 2], 0x1));
    input.extend_from_slice(&local_entry(b"b", &[3, 4, 5], 0x2));

    let output = run_pipeline(input, &WORLD);

    let cd_start = find_signature(&output, CENTRAL_DIRECTORY_HEADER_SIGNATURE);
    let zip64_eocd_start = find_signature(&output, binfile_clip::zip_records::ZIP64_EOCD_SIGNATURE);
    let locator_start = find_signature(&output, binfile_clip::zip_records::ZIP64_EOCD_LOCATOR_SIGNATURE);

    let zip64_eocd = Zip64EocdFixed::decode(&output[zip64_eocd_start + 4..]);
    assert_eq!(zip64_eocd.total_entries, 2);
    assert_eq!(zip64_eocd.central_directory_offset, cd_start as u64);
    assert_eq!(zip64_eocd.central_directory_size, (zip64_eocd_start - cd_start) as u64);

    let locator = Zip64LocatorFixed::decode(&output[locator_start + 4..]);
    assert_eq!(locator.relative_offset_of_zip64_eocd, zip64_eocd_start as u64);
    assert_eq!(locator.total_number_of_disks, 1);
}

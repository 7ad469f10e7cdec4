//! Streaming rewriter (C7): a single forward pass over a ZIP64 input,
//! filtering local entries by tile footprint and producing a patched
//! output stream plus the [`EntryStore`] the central-directory writer
//! needs.

use std::io::{self, Read, Write};

use anyhow::{bail, Context, Result};

use crate::counting_writer::CountingWriter;
use crate::entry_store::{EntryStore, LocalEntry};
use crate::geometry::Rect;
use crate::tile;
use crate::vprintln;
use crate::zip64;
use crate::zip_records::{
    CentralDirFixed, EocdFixed, LocalHeaderFixed, Zip64EocdFixed, Zip64LocatorFixed,
    CENTRAL_DIRECTORY_HEADER_SIGNATURE, EOCD_SIGNATURE, LOCAL_FILE_HEADER_SIGNATURE,
    ZIP64_EOCD_LOCATOR_SIGNATURE, ZIP64_EOCD_SIGNATURE,
};

/// Payload copy buffer size. Not contractual, only bounded and independent
/// of entry size.
const PAYLOAD_BUFFER_SIZE: usize = 10 * 1024 * 1024;

/// Reads the next 4-byte signature. Returns `Ok(None)` on a clean
/// end-of-input (zero bytes read before the signature starts); a partial
/// read is a truncation error.
fn try_read_signature<R: Read>(input: &mut R) -> io::Result<Option<u32>> {
    let mut buf = [0u8; 4];
    let mut read = 0;
    while read < 4 {
        let n = input.read(&mut buf[read..])?;
        if n == 0 {
            return if read == 0 {
                Ok(None)
            } else {
                Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated record signature"))
            };
        }
        read += n;
    }
    Ok(Some(u32::from_le_bytes(buf)))
}

/// Copies exactly `total` bytes from `input` to `output` using `buf` as a
/// scratch chunk, erroring on a short read.
fn copy_exact<R: Read, W: Write>(input: &mut R, output: &mut W, total: u64, buf: &mut [u8]) -> Result<()> {
    let mut remaining = total;
    while remaining > 0 {
        let chunk = remaining.min(buf.len() as u64) as usize;
        input
            .read_exact(&mut buf[..chunk])
            .context("short read while copying payload")?;
        output.write_all(&buf[..chunk]).context("short write while copying payload")?;
        remaining -= chunk as u64;
    }
    Ok(())
}

/// Discards exactly `total` bytes from `input`, erroring on a short read.
fn drain_exact<R: Read>(input: &mut R, total: u64, buf: &mut [u8]) -> Result<()> {
    let mut remaining = total;
    while remaining > 0 {
        let chunk = remaining.min(buf.len() as u64) as usize;
        input
            .read_exact(&mut buf[..chunk])
            .context("short read while discarding payload")?;
        remaining -= chunk as u64;
    }
    Ok(())
}

/// Runs the full streaming pass: reads `input` to exhaustion (or until an
/// unrecognized signature), writes the patched archive body through
/// `writer`, and returns the entry store the caller hands to
/// [`crate::central_directory::write_central_directory`]. `writer` is
/// taken by reference (rather than constructed internally) so the caller
/// can keep accumulating the same running byte offset across both calls.
pub fn rewrite<R: Read, W: Write>(
    input: &mut R,
    writer: &mut CountingWriter<W>,
    query: &Rect,
) -> Result<EntryStore> {
    let mut store = EntryStore::new();
    let mut buf = vec![0u8; PAYLOAD_BUFFER_SIZE];

    loop {
        let signature = try_read_signature(input).context("reading next record signature")?;
        let Some(signature) = signature else {
            break;
        };

        match signature {
            LOCAL_FILE_HEADER_SIGNATURE => {
                handle_local_file(input, writer, &mut store, query, &mut buf)?;
            }
            CENTRAL_DIRECTORY_HEADER_SIGNATURE => skip_central_directory_header(input, &mut buf)?,
            ZIP64_EOCD_SIGNATURE => skip_zip64_eocd(input, &mut buf)?,
            ZIP64_EOCD_LOCATOR_SIGNATURE => skip_zip64_locator(input)?,
            EOCD_SIGNATURE => skip_eocd(input, &mut buf)?,
            other => {
                vprintln!("unrecognized signature {other:#010x}, stopping scan");
                break;
            }
        }
    }

    Ok(store)
}

fn handle_local_file<R: Read, W: Write>(
    input: &mut R,
    writer: &mut CountingWriter<W>,
    store: &mut EntryStore,
    query: &Rect,
    buf: &mut [u8],
) -> Result<()> {
    let mut fixed_bytes = [0u8; LocalHeaderFixed::SIZE];
    input.read_exact(&mut fixed_bytes).context("short read on local file header")?;
    let mut fixed = LocalHeaderFixed::decode(&fixed_bytes);

    let mut file_name = vec![0u8; fixed.file_name_length as usize];
    input.read_exact(&mut file_name).context("short read on local file name")?;

    let mut extra_area = vec![0u8; fixed.extra_field_length as usize];
    input.read_exact(&mut extra_area).context("short read on local extra field")?;

    let filesize = zip64::authoritative_size(fixed.compressed_size, &extra_area);
    let keep = tile::should_keep(query, &file_name);

    let new_size = if keep {
        filesize
    } else {
        drain_exact(input, filesize, buf)?;
        0
    };

    let written_before = writer.written();
    zip64::patch_entry(
        &mut fixed.compressed_size,
        &mut fixed.uncompressed_size,
        &mut fixed.crc32,
        &mut fixed.compression_method,
        &mut extra_area,
        written_before,
        new_size,
    );

    writer.write_all(&LOCAL_FILE_HEADER_SIGNATURE.to_le_bytes())?;
    writer.write_all(&fixed.encode())?;
    writer.write_all(&file_name)?;
    writer.write_all(&extra_area)?;

    if new_size > 0 {
        copy_exact(input, writer, new_size, buf)?;
    }

    let uncompressed_size = zip64::authoritative_uncompressed_size(fixed.uncompressed_size, &extra_area);
    vprintln!(
        "{} {}",
        if keep { "keep" } else { "blank" },
        String::from_utf8_lossy(&file_name)
    );

    store.append(LocalEntry {
        header: fixed,
        file_name,
        extra_area,
        offset: written_before,
        compressed_size: new_size,
        uncompressed_size,
    });

    Ok(())
}

fn skip_central_directory_header<R: Read>(input: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut fixed_bytes = [0u8; CentralDirFixed::SIZE];
    input
        .read_exact(&mut fixed_bytes)
        .context("short read on central directory header")?;
    let fixed = CentralDirFixed::decode(&fixed_bytes);
    let trailer =
        fixed.file_name_length as u64 + fixed.extra_field_length as u64 + fixed.file_comment_length as u64;
    drain_exact(input, trailer, buf)
}

fn skip_zip64_eocd<R: Read>(input: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut fixed_bytes = [0u8; Zip64EocdFixed::SIZE];
    input.read_exact(&mut fixed_bytes).context("short read on ZIP64 EOCD")?;
    let fixed = Zip64EocdFixed::decode(&fixed_bytes);
    let consumed_after_signature = Zip64EocdFixed::SIZE as u64;
    let declared_after_signature = fixed.size_of_zip64_eocd_record + 12 - 4;
    let trailer = declared_after_signature.saturating_sub(consumed_after_signature);
    drain_exact(input, trailer, buf)
}

fn skip_zip64_locator<R: Read>(input: &mut R) -> Result<()> {
    let mut fixed_bytes = [0u8; Zip64LocatorFixed::SIZE];
    input
        .read_exact(&mut fixed_bytes)
        .context("short read on ZIP64 EOCD locator")?;
    let _ = Zip64LocatorFixed::decode(&fixed_bytes);
    Ok(())
}

fn skip_eocd<R: Read>(input: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut fixed_bytes = [0u8; EocdFixed::SIZE];
    input.read_exact(&mut fixed_bytes).context("short read on EOCD")?;
    let fixed = EocdFixed::decode(&fixed_bytes);
    drain_exact(input, fixed.file_comment_length as u64, buf)
}

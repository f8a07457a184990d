//! Fixtures shared by the sync tests.

use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// One archive entry: a file with content, or a directory when `None`.
pub type BundleEntry<'a> = (&'a str, Option<&'a str>);

/// Build a zip archive in memory.
pub fn build_bundle(entries: &[BundleEntry<'_>]) -> Vec<u8> {
    build_bundle_with(entries, CompressionMethod::Stored)
}

pub fn build_bundle_with(entries: &[BundleEntry<'_>], method: CompressionMethod) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(method);

    for (name, content) in entries {
        match content {
            Some(content) => {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content.as_bytes()).unwrap();
            }
            None => writer.add_directory(*name, options).unwrap(),
        }
    }

    writer.finish().unwrap().into_inner()
}

/// Rewrite an archive the way streaming writers lay it out: each local
/// header sets general purpose flag bit 3 with zeroed CRC and sizes, and the
/// entry data is followed by a data descriptor. Expects an archive without
/// zip64 records or a trailing comment.
pub fn with_data_descriptors(bundle: &[u8]) -> Vec<u8> {
    let eocd = bundle.len() - 22;
    assert_eq!(read_u32(bundle, eocd), 0x0605_4b50, "no end of central directory");
    let entry_count = read_u16(bundle, eocd + 10) as usize;
    let mut cursor = read_u32(bundle, eocd + 16) as usize;

    let mut output = Vec::new();
    let mut central = Vec::new();
    for _ in 0..entry_count {
        let record_len = 46
            + read_u16(bundle, cursor + 28) as usize
            + read_u16(bundle, cursor + 30) as usize
            + read_u16(bundle, cursor + 32) as usize;
        let mut record = bundle[cursor..cursor + record_len].to_vec();
        let crc = read_u32(bundle, cursor + 16);
        let compressed_size = read_u32(bundle, cursor + 20);
        let uncompressed_size = read_u32(bundle, cursor + 24);
        let local = read_u32(bundle, cursor + 42) as usize;

        let header_len = 30
            + read_u16(bundle, local + 26) as usize
            + read_u16(bundle, local + 28) as usize;
        let mut header = bundle[local..local + header_len].to_vec();
        header[6] |= 0x08;
        header[14..26].fill(0);

        record[8] |= 0x08;
        record[42..46].copy_from_slice(&(output.len() as u32).to_le_bytes());

        let data_start = local + header_len;
        output.extend_from_slice(&header);
        output.extend_from_slice(&bundle[data_start..data_start + compressed_size as usize]);
        output.extend_from_slice(&0x0807_4b50u32.to_le_bytes());
        output.extend_from_slice(&crc.to_le_bytes());
        output.extend_from_slice(&compressed_size.to_le_bytes());
        output.extend_from_slice(&uncompressed_size.to_le_bytes());

        central.extend_from_slice(&record);
        cursor += record_len;
    }

    let mut end = bundle[eocd..].to_vec();
    end[16..20].copy_from_slice(&(output.len() as u32).to_le_bytes());
    output.extend_from_slice(&central);
    output.extend_from_slice(&end);
    output
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

pub const DJANGO_PO: &str = r#"msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"
"Plural-Forms: nplurals=2; plural=(n != 1);\n"

msgid "GREETING"
msgstr "Hello,"
"#;

/// The three-language nested PO export used across tests.
pub fn po_nested_bundle() -> Vec<u8> {
    build_bundle(&[
        ("en/", None),
        ("en/django.po", Some(DJANGO_PO)),
        ("es/", None),
        ("es/django.po", Some(DJANGO_PO)),
        ("zh_Hans/", None),
        ("zh_Hans/django.po", Some(DJANGO_PO)),
    ])
}

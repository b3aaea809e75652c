//! Comment payload encoding.
//!
//! A transfer comment that does not fit the deep-link grammar is shipped
//! to the wallet as a binary cell: a zero 32-bit opcode followed by the
//! UTF-8 bytes, continued across reference cells ("snake" layout) when it
//! exceeds one cell's 1023-bit capacity. The cell tree is serialized as a
//! generic Bag of Cells with a CRC32-C trailer and base64-encoded for the
//! wallet-connect wire.

use std::sync::Arc;

use thiserror::Error;

/// Maximum number of bits in a cell's data.
const MAX_CELL_BITS: usize = 1023;

/// Maximum number of references a cell can have.
const MAX_CELL_REFS: usize = 4;

/// Bytes of comment text that fit in the root cell after the 32-bit tag.
const ROOT_COMMENT_BYTES: usize = (MAX_CELL_BITS - 32) / 8;

/// Bytes of comment text per continuation cell.
const CONTINUATION_BYTES: usize = MAX_CELL_BITS / 8;

/// Upper bound on an encodable comment, in UTF-8 bytes.
pub const MAX_COMMENT_BYTES: usize = 2048;

/// BoC magic number for the generic format.
const BOC_GENERIC_MAGIC: u32 = 0xb5ee9c72;

/// Errors from payload cell construction.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The cell data would exceed 1023 bits.
    #[error("Cell data too long: {0} bits (max 1023)")]
    DataTooLong(usize),

    /// The cell would carry more than 4 references.
    #[error("Too many cell references: {0} (max 4)")]
    TooManyRefs(usize),

    /// The comment exceeds the protocol payload bound.
    #[error("Comment payload too large: {len} bytes (max {max})")]
    CommentTooLong { len: usize, max: usize },
}

/// Result type for payload encoding.
pub type PayloadResult<T> = Result<T, PayloadError>;

/// An ordinary TON cell: up to 1023 bits of data and 4 references.
#[derive(Debug, Clone)]
pub struct Cell {
    data: Vec<u8>,
    bit_len: usize,
    references: Vec<Arc<Cell>>,
}

impl Cell {
    /// Number of data bits.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Raw data bytes (without completion tag).
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Child cells.
    pub fn references(&self) -> &[Arc<Cell>] {
        &self.references
    }

    /// The two BoC descriptor bytes of an ordinary, level-zero cell.
    fn descriptors(&self) -> (u8, u8) {
        let d1 = self.references.len() as u8;
        let d2 = (self.bit_len / 8 + self.bit_len.div_ceil(8)) as u8;
        (d1, d2)
    }

    /// Data bytes with the completion tag applied when the bit length is
    /// not byte-aligned.
    fn data_with_completion_tag(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        let remainder = self.bit_len % 8;
        if remainder != 0 {
            if let Some(last) = out.last_mut() {
                *last |= 1 << (7 - remainder);
            }
        }
        out
    }
}

/// Builder for payload cells.
#[derive(Debug, Default)]
pub struct CellBuilder {
    data: Vec<u8>,
    bit_len: usize,
    references: Vec<Arc<Cell>>,
}

impl CellBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        CellBuilder::default()
    }

    /// Store a single bit.
    pub fn store_bit(&mut self, bit: bool) -> PayloadResult<&mut Self> {
        if self.bit_len >= MAX_CELL_BITS {
            return Err(PayloadError::DataTooLong(self.bit_len + 1));
        }

        let byte_index = self.bit_len / 8;
        let bit_index = 7 - (self.bit_len % 8);
        if byte_index >= self.data.len() {
            self.data.push(0);
        }
        if bit {
            self.data[byte_index] |= 1 << bit_index;
        }
        self.bit_len += 1;
        Ok(self)
    }

    /// Store an unsigned integer, big-endian, in `bits` bits.
    pub fn store_uint(&mut self, value: u64, bits: usize) -> PayloadResult<&mut Self> {
        if self.bit_len + bits > MAX_CELL_BITS {
            return Err(PayloadError::DataTooLong(self.bit_len + bits));
        }
        for i in (0..bits).rev() {
            self.store_bit((value >> i) & 1 == 1)?;
        }
        Ok(self)
    }

    /// Store an unsigned 32-bit integer.
    pub fn store_u32(&mut self, value: u32) -> PayloadResult<&mut Self> {
        self.store_uint(value as u64, 32)
    }

    /// Store a byte array.
    pub fn store_bytes(&mut self, bytes: &[u8]) -> PayloadResult<&mut Self> {
        for &byte in bytes {
            self.store_uint(byte as u64, 8)?;
        }
        Ok(self)
    }

    /// Store a reference to another cell.
    pub fn store_ref(&mut self, cell: Arc<Cell>) -> PayloadResult<&mut Self> {
        if self.references.len() >= MAX_CELL_REFS {
            return Err(PayloadError::TooManyRefs(self.references.len() + 1));
        }
        self.references.push(cell);
        Ok(self)
    }

    /// Number of bits that can still be stored.
    pub fn bits_left(&self) -> usize {
        MAX_CELL_BITS - self.bit_len
    }

    /// Build the cell.
    pub fn build(self) -> Cell {
        Cell {
            data: self.data,
            bit_len: self.bit_len,
            references: self.references,
        }
    }
}

/// Build the text-comment cell: zero 32-bit opcode + UTF-8 bytes, with
/// snake continuation cells for text beyond one cell's capacity.
pub fn comment_cell(text: &str) -> PayloadResult<Cell> {
    let bytes = text.as_bytes();
    if bytes.len() > MAX_COMMENT_BYTES {
        return Err(PayloadError::CommentTooLong {
            len: bytes.len(),
            max: MAX_COMMENT_BYTES,
        });
    }

    let mut builder = CellBuilder::new();
    builder.store_u32(0)?;

    let head = bytes.len().min(ROOT_COMMENT_BYTES);
    builder.store_bytes(&bytes[..head])?;
    if bytes.len() > head {
        let continuation = snake_continuation(&bytes[head..])?;
        builder.store_ref(Arc::new(continuation))?;
    }
    Ok(builder.build())
}

/// Build the continuation chain for snake-format data.
fn snake_continuation(data: &[u8]) -> PayloadResult<Cell> {
    let mut builder = CellBuilder::new();
    let head = data.len().min(CONTINUATION_BYTES);
    builder.store_bytes(&data[..head])?;
    if data.len() > head {
        let next = snake_continuation(&data[head..])?;
        builder.store_ref(Arc::new(next))?;
    }
    Ok(builder.build())
}

/// Serialize a cell tree as a generic BoC (root-first cell order, with
/// CRC32-C trailer, no index).
pub fn serialize_boc(root: &Cell) -> Vec<u8> {
    // Pre-order walk; payload trees are chains, so no deduplication.
    let mut cells: Vec<&Cell> = Vec::new();
    collect_preorder(root, &mut cells);
    let cell_count = cells.len();

    let size_bytes = bytes_needed(cell_count);

    // Serialize each cell: descriptors, tagged data, child indices.
    let mut cell_data: Vec<Vec<u8>> = Vec::with_capacity(cell_count);
    let mut next_index = 0usize;
    for cell in &cells {
        next_index += 1;
        let mut out = Vec::new();
        let (d1, d2) = cell.descriptors();
        out.push(d1);
        out.push(d2);
        out.extend_from_slice(&cell.data_with_completion_tag());
        // Children of a chain immediately follow their parent.
        for offset in 0..cell.references().len() {
            write_uint(&mut out, (next_index + offset) as u64, size_bytes);
        }
        cell_data.push(out);
    }
    let total_cells_size: usize = cell_data.iter().map(Vec::len).sum();
    let off_bytes = bytes_needed(total_cells_size);

    let mut result = Vec::new();
    result.extend_from_slice(&BOC_GENERIC_MAGIC.to_be_bytes());

    // Flags: has_crc set, no index, no cache bits.
    result.push(0x40 | size_bytes as u8);
    result.push(off_bytes as u8);

    write_uint(&mut result, cell_count as u64, size_bytes);
    write_uint(&mut result, 1, size_bytes); // roots
    write_uint(&mut result, 0, size_bytes); // absent
    write_uint(&mut result, total_cells_size as u64, off_bytes);
    write_uint(&mut result, 0, size_bytes); // root index

    for data in cell_data {
        result.extend_from_slice(&data);
    }

    let crc = crc32c(&result);
    result.extend_from_slice(&crc.to_le_bytes());
    result
}

/// Serialize a cell tree to the base64 wire form.
pub fn boc_base64(root: &Cell) -> String {
    base64::Engine::encode(
        &base64::engine::general_purpose::STANDARD,
        serialize_boc(root),
    )
}

fn collect_preorder<'a>(cell: &'a Cell, out: &mut Vec<&'a Cell>) {
    out.push(cell);
    for reference in cell.references() {
        collect_preorder(reference, out);
    }
}

/// Bytes needed to represent `n`.
fn bytes_needed(n: usize) -> usize {
    if n == 0 {
        1
    } else {
        (((64 - (n as u64).leading_zeros()) + 7) / 8) as usize
    }
}

/// Write an unsigned integer with a fixed byte width, big-endian.
fn write_uint(buf: &mut Vec<u8>, value: u64, bytes: usize) {
    for i in (0..bytes).rev() {
        buf.push((value >> (i * 8)) as u8);
    }
}

/// CRC32-C checksum (Castagnoli polynomial).
fn crc32c(data: &[u8]) -> u32 {
    const CRC32C: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISCSI);
    CRC32C.checksum(data)
}

//! Bit granularity readers and writers over byte buffers. Bits are packed
//! into bytes most-significant-bit first: the first bit written lands in bit 7
//! of the first byte.

use crate::{Error, Result};

/// Returns the number of bits needed to represent the word 'num'.
pub fn num_bits(num: u64) -> u32 {
    64 - num.leading_zeros()
}

/// Collects bits into a byte buffer.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// The completed bytes.
    out: Vec<u8>,
    /// Holds the bits that don't form a full byte yet. The bits are packed to
    /// the right [.....210] and bits above 'pending' are zero.
    acc: u64,
    /// The number of valid bits in 'acc' (0..8 between calls).
    pending: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append up to 8 bits to the accumulator and move a completed byte into
    /// the output.
    fn push_chunk(&mut self, chunk: u64, num: u32) {
        debug_assert!(num <= 8 && num_bits(chunk) <= num);
        self.acc = (self.acc << num) | chunk;
        self.pending += num;
        if self.pending >= 8 {
            self.pending -= 8;
            self.out.push((self.acc >> self.pending) as u8);
            self.acc &= (1 << self.pending) - 1;
        }
    }

    /// Write the lowest 'width' bits of 'value', most significant bit first.
    /// If 'width' is wider than 'value' the value is padded with zeros on the
    /// left. Fails if 'value' needs more than 'width' bits.
    pub fn write_bits(&mut self, value: u64, width: u32) -> Result<()> {
        if num_bits(value) > width {
            return Err(Error::InvalidWidth { value, width });
        }

        let mut left = width;
        while left > 0 {
            let take = left.min(8);
            left -= take;
            // Bits above bit 63 are the zero padding.
            let chunk = if left >= 64 {
                0
            } else {
                (value >> left) & ((1 << take) - 1)
            };
            self.push_chunk(chunk, take);
        }
        Ok(())
    }

    /// Write 'bytes' at full width, except for the last byte, from which only
    /// the upper '8 - trailing_bits_to_drop' bits are written. This is used for
    /// concatenating bit-packed buffers without padding in the middle.
    pub fn write_bytes(
        &mut self,
        bytes: &[u8],
        trailing_bits_to_drop: u32,
    ) -> Result<()> {
        if trailing_bits_to_drop > 7 {
            return Err(Error::InvalidWidth {
                value: trailing_bits_to_drop as u64,
                width: 3,
            });
        }
        if let Some((last, body)) = bytes.split_last() {
            for b in body {
                self.push_chunk(*b as u64, 8);
            }
            let keep = 8 - trailing_bits_to_drop;
            self.push_chunk((*last >> trailing_bits_to_drop) as u64, keep);
        }
        Ok(())
    }

    /// Complete the last partial byte with zero bits. Returns the number of
    /// padding bits that were added (0..=7).
    pub fn flush(&mut self) -> u32 {
        if self.pending == 0 {
            return 0;
        }
        let padding = 8 - self.pending;
        self.out.push((self.acc << padding) as u8);
        self.acc = 0;
        self.pending = 0;
        padding
    }

    /// Returns the number of bits that were written, including padding.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.out.len() * 8 + self.pending as usize
    }

    /// Returns the written bytes. Bits that were not flushed are not included.
    pub fn bytes(&self) -> &[u8] {
        &self.out
    }

    pub fn into_bytes(self) -> Vec<u8> {
        debug_assert!(self.pending == 0, "Writer was not flushed");
        self.out
    }
}

/// Reads bits from a byte buffer with a cursor that only moves forward.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    /// Index of the next bit to read.
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, pos: 0 }
    }

    /// Returns the number of bits that were not read yet.
    #[must_use]
    pub fn bits_remaining(&self) -> usize {
        self.buffer.len() * 8 - self.pos
    }

    /// Returns the index of the next bit to read.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Make sure that 'requested' bits are available.
    fn check_available(&self, requested: usize) -> Result<()> {
        let remaining = self.bits_remaining();
        if remaining < requested {
            return Err(Error::EndOfBuffer {
                requested,
                remaining,
            });
        }
        Ok(())
    }

    /// Read a single bit. Returns 0 or 1.
    pub fn read_bit(&mut self) -> Result<u8> {
        self.check_available(1)?;
        let byte = self.buffer[self.pos / 8];
        let bit = (byte >> (7 - self.pos % 8)) & 1;
        self.pos += 1;
        Ok(bit)
    }

    /// Read a 'width'-bit number that was written most significant bit first.
    /// On failure the cursor does not move.
    pub fn read_bits(&mut self, width: u32) -> Result<u64> {
        if width > 64 {
            return Err(Error::InvalidWidth { value: 0, width });
        }
        self.check_available(width as usize)?;
        let mut val = 0;
        for _ in 0..width {
            val = (val << 1) | self.read_bit()? as u64;
        }
        Ok(val)
    }

    /// Read 'amount' bytes starting at the current bit offset, which does not
    /// need to be byte aligned. On failure the cursor does not move.
    pub fn read_bytes(&mut self, amount: usize) -> Result<Vec<u8>> {
        self.check_available(amount * 8)?;
        let mut res = Vec::with_capacity(amount);
        for _ in 0..amount {
            res.push(self.read_bits(8)? as u8);
        }
        Ok(res)
    }

    /// Read 'amount' bytes (up to 8) and pack them into a big endian integer.
    pub fn read_int(&mut self, amount: usize) -> Result<u64> {
        if amount > 8 {
            return Err(Error::InvalidWidth {
                value: amount as u64 * 8,
                width: 64,
            });
        }
        self.read_bits(amount as u32 * 8)
    }
}

#[test]
fn test_writer_pads_fixed_width_fields() {
    let mut writer = BitWriter::new();
    writer.write_bits(1, 3).unwrap();
    writer.write_bits(0, 5).unwrap();
    writer.write_bits(0x2, 4).unwrap();
    assert_eq!(writer.flush(), 4);
    assert_eq!(writer.into_bytes(), [0b0010_0000, 0b0010_0000]);
}

#[test]
fn test_writer_wide_values() {
    let mut writer = BitWriter::new();
    writer.write_bits(u64::MAX, 64).unwrap();
    writer.write_bits(0x5, 70).unwrap();
    assert_eq!(writer.bit_len(), 134);
    let padding = writer.flush();
    assert_eq!(padding, 2);

    let bytes = writer.into_bytes();
    let mut reader = BitReader::new(&bytes);
    assert_eq!(reader.read_bits(64).unwrap(), u64::MAX);
    assert_eq!(reader.read_bits(6).unwrap(), 0);
    assert_eq!(reader.read_bits(64).unwrap(), 0x5);
    assert_eq!(reader.bits_remaining(), 2);
}

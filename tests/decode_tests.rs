use ezk_zero12v::{
    CodecTag, DecodeError, Decoder, DecoderConfig, Frame, Geometry, NEUTRAL, PictureType,
    chroma_width, decode_packet, row_stride,
};

/// Pack three 10 bit values into a 012v word
fn pack(a: u16, b: u16, c: u16) -> [u8; 4] {
    let word = u32::from(a & 0x3FF) | (u32::from(b & 0x3FF) << 10) | (u32::from(c & 0x3FF) << 20);

    word.to_le_bytes()
}

/// Deterministic packet of 10 bit values, `n` words long
fn make_packet(n: usize) -> Vec<u8> {
    (0..n)
        .flat_map(|i| {
            let i = i as u16;
            pack(i.wrapping_mul(7), i.wrapping_mul(13) ^ 0x2AA, i.wrapping_mul(31) ^ 0x155)
        })
        .collect()
}

fn decode(width: usize, height: usize, packet: &[u8]) -> Result<Frame, DecodeError> {
    let mut decoder = Decoder::new(DecoderConfig::new(width, height));
    decoder.decode(packet)?;

    Ok(decoder.take_frame().unwrap())
}

#[test]
fn single_hextet() {
    let mut packet = Vec::new();
    packet.extend(pack(0x001, 0x3FF, 0x200));
    packet.extend(pack(0x155, 0x2AA, 0x0F0));
    packet.extend(pack(0x00F, 0x100, 0x3C3));
    packet.extend(pack(0x123, 0x321, 0x000));

    let frame = decode(6, 1, &packet).unwrap();

    let y: Vec<u16> = frame.rows(0).flatten().copied().collect();
    let u: Vec<u16> = frame.rows(1).flatten().copied().collect();
    let v: Vec<u16> = frame.rows(2).flatten().copied().collect();

    assert_eq!(y, [0x3FF, 0x155, 0x0F0, 0x100, 0x123, 0x000].map(|s: u16| s << 6));
    assert_eq!(u, [0x001, 0x2AA, 0x3C3].map(|s: u16| s << 6));
    assert_eq!(v, [0x200, 0x00F, 0x321].map(|s: u16| s << 6));
}

#[test]
fn row_lengths_and_sample_bits() {
    for width in 2..40 {
        for height in [1, 2, 5] {
            let packet = make_packet((row_stride(width).unwrap() * height).div_ceil(4));
            let frame = decode(width, height, &packet).unwrap();

            assert_eq!(frame.rows(0).count(), height);
            assert_eq!(frame.rows(1).count(), height);
            assert_eq!(frame.rows(2).count(), height);

            assert!(frame.rows(0).all(|row| row.len() == width));
            assert!(frame.rows(1).all(|row| row.len() == chroma_width(width)));
            assert!(frame.rows(2).all(|row| row.len() == chroma_width(width)));

            for plane in 0..3 {
                assert!(
                    frame.rows(plane).flatten().all(|&s| s & 0x3F == 0),
                    "low bits set for {width}x{height}"
                );
            }
        }
    }
}

#[test]
fn width_8_partial_hextet() {
    let stride = row_stride(8).unwrap();
    let mut packet = make_packet(12);
    packet.truncate(stride * 2);

    let frame = decode(8, 2, &packet).unwrap();

    for (row, y) in frame.rows(0).enumerate() {
        let line = &packet[row * stride..];
        let word = |i: usize| u32::from_le_bytes(line[i * 4..i * 4 + 4].try_into().unwrap());

        // Column 6 is the luma of the fifth word, column 7 has no data left in the row
        assert_eq!(y[6], ((word(4) >> 4) & 0xFFC0) as u16);
        assert_eq!(y[7], NEUTRAL);
    }

    for u in frame.rows(1) {
        assert_eq!(u.len(), 4);
    }
}

#[test]
fn width_4_tail_is_neutral() {
    let packet = make_packet(5);
    let frame = decode(4, 2, &packet).unwrap();

    let stride = row_stride(4).unwrap();
    assert_eq!(stride, 10);

    for row in 0..2 {
        let line = &packet[row * stride..row * stride + stride];
        let w0 = u32::from_le_bytes(line[0..4].try_into().unwrap());
        let w1 = u32::from_le_bytes(line[4..8].try_into().unwrap());

        let y = frame.rows(0).nth(row).unwrap();
        let u = frame.rows(1).nth(row).unwrap();
        let v = frame.rows(2).nth(row).unwrap();

        assert_eq!(y[0], ((w0 >> 4) & 0xFFC0) as u16);
        assert_eq!(y[1], ((w1 << 6) & 0xFFC0) as u16);
        assert_eq!(y[2], ((w1 >> 14) & 0xFFC0) as u16);
        assert_eq!(y[3], NEUTRAL);

        assert_eq!(u, [((w0 << 6) & 0xFFC0) as u16, ((w1 >> 4) & 0xFFC0) as u16]);
        assert_eq!(v, [((w0 >> 14) & 0xFFC0) as u16, NEUTRAL]);
    }
}

#[test]
fn rows_start_at_stride_boundaries() {
    // Every row of width 4 leaves 2 bytes unread, the next row must not start there
    let mut packet = vec![0u8; 20];
    packet[10..14].copy_from_slice(&pack(0x3FF, 0x3FF, 0x3FF));

    let frame = decode(4, 2, &packet).unwrap();

    let first: Vec<u16> = frame.rows(0).next().unwrap().to_vec();
    let second: Vec<u16> = frame.rows(0).nth(1).unwrap().to_vec();

    assert_eq!(first, [0, 0, 0, NEUTRAL]);
    assert_eq!(second, [0xFFC0, 0, 0, NEUTRAL]);
}

#[test]
fn truncated_packets_are_rejected() {
    let (width, height) = (12, 3);
    let needed = row_stride(width).unwrap() * height;
    let packet = make_packet(needed / 4);
    assert_eq!(packet.len(), needed);

    for missing in 1..=needed {
        let mut decoder = Decoder::new(DecoderConfig::new(width, height));
        let err = decoder.decode(&packet[..needed - missing]).unwrap_err();

        assert!(matches!(
            err,
            DecodeError::PacketTooSmall { expected, got } if expected == needed && got == needed - missing
        ));
        assert!(decoder.frame().is_none());
        assert_eq!(decoder.pool().idle(), 0);
    }
}

#[test]
fn invalid_dimensions() {
    for (width, height) in [(0, 1), (1, 1), (1, 100), (16, 0)] {
        let err = decode(width, height, &[0; 1024]).unwrap_err();

        assert!(matches!(err, DecodeError::InvalidDimensions { .. }));
        assert_eq!(
            err.to_string(),
            format!("dimensions {width}x{height} not supported")
        );
    }
}

#[test]
fn consumes_whole_packet() {
    let packet = make_packet(100);
    let mut decoder = Decoder::new(DecoderConfig::new(6, 3));

    let decoded = decoder.decode(&packet).unwrap();

    assert_eq!(decoded.bytes_consumed, 400);
    assert!(decoded.frame.key_frame());
    assert_eq!(decoded.frame.picture_type(), PictureType::Intra);
    assert_eq!(decoded.frame.geometry(), Geometry::new(6, 3));
}

#[test]
fn alpha_tag_decodes_identically() {
    let packet = make_packet(row_stride(30).unwrap() * 4 / 4 + 1);

    let mut opaque = Decoder::new(DecoderConfig::new(30, 4).with_codec_tag(CodecTag::ZERO12V));
    let mut alpha = Decoder::new(DecoderConfig::new(30, 4).with_codec_tag(CodecTag::A12V));

    let a = opaque.decode(&packet).unwrap().frame.clone().into_planes();
    let b = alpha.decode(&packet).unwrap().frame.clone().into_planes();

    assert_eq!(a, b);
}

#[test]
fn stateless_and_stateful_decoding_agree() {
    let geometry = Geometry::new(22, 3);
    let packet = make_packet(row_stride(22).unwrap() * 3 / 4 + 1);

    let mut frame = Frame::blank(geometry).unwrap();
    decode_packet(&packet, &mut frame).unwrap();

    let decoded = decode(22, 3, &packet).unwrap();

    assert_eq!(frame.into_planes(), decoded.into_planes());
}

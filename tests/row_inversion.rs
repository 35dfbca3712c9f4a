extern crate rand;
extern crate tritex;

use rand::Rng;
use tritex::prelude::*;

fn rows(pitch: usize, height: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..pitch * height).map(|_| rng.gen::<u8>()).collect()
}

#[test]
fn involution() {
    let mut rng = rand::thread_rng();
    for _ in 0..64 {
        let pitch = rng.gen_range(1, 64);
        let height = rng.gen_range(0, 33);

        let origin = rows(pitch, height);
        let mut bytes = origin.clone();

        invert_rows(pitch, height, &mut bytes).unwrap();
        for i in 0..height {
            let j = height - 1 - i;
            assert_eq!(
                &bytes[i * pitch..(i + 1) * pitch],
                &origin[j * pitch..(j + 1) * pitch]
            );
        }

        invert_rows(pitch, height, &mut bytes).unwrap();
        assert_eq!(bytes, origin);
    }
}

#[test]
fn odd_height_keeps_middle_row() {
    let pitch = 12;
    let height = 5;
    let origin = rows(pitch, height);
    let mut bytes = origin.clone();

    invert_rows(pitch, height, &mut bytes).unwrap();
    assert_eq!(&bytes[2 * pitch..3 * pitch], &origin[2 * pitch..3 * pitch]);
}

#[test]
fn mismatched_length_is_untouched() {
    let mut bytes = vec![1, 2, 3, 4, 5];
    let err = invert_rows(2, 3, &mut bytes).unwrap_err();
    match err.downcast_ref::<Error>() {
        Some(Error::PixelBufferSize { len: 5, pitch: 2, height: 3 }) => {}
        _ => panic!("unexpected error {}", err),
    }

    assert_eq!(bytes, vec![1, 2, 3, 4, 5]);
}

#[test]
fn pixel_buffer_with_padding() {
    // 1 pixel wide, rows padded to 8 bytes.
    let bytes = vec![1, 1, 1, 1, 0, 0, 0, 0, 2, 2, 2, 2, 0, 0, 0, 0];
    let mut pixels = PixelBuffer::with_pitch(1, 2, 8, bytes).unwrap();
    pixels.invert_rows().unwrap();

    assert_eq!(pixels.row(0), &[2, 2, 2, 2, 0, 0, 0, 0]);
    assert_eq!(pixels.into_packed(), vec![2, 2, 2, 2, 1, 1, 1, 1]);
}

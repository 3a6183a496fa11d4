use honggfuzz::fuzz;
use sorensen::{Descriptor, DESCRIPTOR_SIZE};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            match Descriptor::from_bytes(data) {
                Ok(d) => {
                    assert_eq!(data.len(), DESCRIPTOR_SIZE);
                    assert!(d.set_bits <= d.total_bits);
                    assert_eq!(d.to_bytes().as_slice(), data);
                }
                Err(_) => {}
            }
        });
    }
}

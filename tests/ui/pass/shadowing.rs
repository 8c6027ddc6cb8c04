use observable_defaults::{Property, observable_default, store::STANDARD};

#[observable_default(key = "volume", default = 50, store = STANDARD)]
static mut volume: u8;

fn louder(volume: u8) -> u8 {
    volume + 1
}

fn main() {
    let volume = volume::get();
    volume::set(louder(volume));

    if let Some(volume) = Some(volume::get()) {
        assert_eq!(volume, 51);
    }
}

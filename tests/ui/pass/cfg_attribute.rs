use observable_defaults::{Property, observable_default, store::STANDARD};

#[observable_default(key = "disabled", default = 0, store = STANDARD)]
#[cfg(any())]
static mut disabled: u32;

#[observable_default(key = "enabled", default = 1, store = STANDARD)]
#[cfg(all())]
static mut enabled: u32;

fn main() {
    assert_eq!(enabled::get(), 1);
}

use observable_defaults::{Property, observable_default, store::STANDARD};

#[observable_default(key = "type", default = String::from("plain"), store = STANDARD)]
static mut r#type: String;

fn main() {
    assert_eq!(r#type::get(), "plain");
    assert_eq!(<r#type as Property>::NAME, "type");
}

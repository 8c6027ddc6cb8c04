use observable_defaults::observable_default;

#[observable_default(key = "name", default = String::new(), store = STANDARD)]
static NAME: String = String::new();

fn main() {
    assert!(NAME.is_empty());
}

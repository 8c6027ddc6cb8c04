mod settings {
    use observable_defaults::{observable_default, store::STANDARD};

    /// Number of times the application has been opened.
    #[observable_default(key = "launch_count", default = 0, store = STANDARD)]
    pub static mut launch_count: u32;

    #[observable_default(key = "last_opened", store = STANDARD)]
    pub(crate) static mut last_opened: Option<String>;
}

use observable_defaults::Property;

fn main() {
    settings::launch_count::set(settings::launch_count::get() + 1);
    settings::last_opened::set(Some("notes.txt".to_string()));

    assert_eq!(settings::launch_count::get(), 1);
}

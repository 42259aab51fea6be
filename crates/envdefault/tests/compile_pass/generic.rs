//! Generic records need no hand-written `'static` bounds.

use envdefault::EnvDefault;

#[derive(EnvDefault, Default)]
pub struct Wrapped<T: Default> {
    pub name: String,
    extra: T,
}

#[derive(EnvDefault)]
pub struct Borrowed<'a> {
    pub name: String,
    label: &'a str,
}

fn main() {
    let wrapped: Wrapped<Vec<u8>> = Wrapped::from_env_default().unwrap_or_default();
    let _ = wrapped.extra.len();

    let mut borrowed = Borrowed {
        name: String::new(),
        label: "static",
    };
    let _ = borrowed.load_env_default();
    let _ = borrowed.label;
}

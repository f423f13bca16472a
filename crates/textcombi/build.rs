use rustc_version::{version_meta, Channel};

// NOTE: Activates the 'nightly' feature described in the Cargo.toml file, so that
//       the `Combi` trait can carry `rustc_on_unimplemented` messages.
fn main() {
    if version_meta().unwrap().channel == Channel::Nightly {
        println!("cargo:rustc-cfg=feature=\"nightly\"");
    }
}

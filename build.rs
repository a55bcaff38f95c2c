
use std::{env, fs::File, path::PathBuf};
use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};

// ------------------------------------------------------------

fn main() -> ()
{
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
    let mut file = File::create(out_dir.join("gl_bindings.rs"))
        .expect("could not create gl_bindings.rs");
    Registry::new(Api::Gl, (3, 3), Profile::Core, Fallbacks::All, [])
        .write_bindings(StructGenerator, &mut file)
        .expect("could not write gl bindings");
    println!("cargo:rerun-if-changed=build.rs");
}

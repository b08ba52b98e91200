use std::path::PathBuf;
use std::process::ExitCode;

use gmsm64_core::assets::load_level;

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("usage: cargo run -p gmsm64_core --bin level_info -- <level.toml>");
        return ExitCode::FAILURE;
    };

    let surfaces = match load_level(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    println!("index,type,force,terrain,x0,y0,z0,x1,y1,z1,x2,y2,z2");
    for (i, s) in surfaces.iter().enumerate() {
        let [a, b, c] = s.vertices;
        println!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{}",
            i, s.surface_type, s.force, s.terrain, a[0], a[1], a[2], b[0], b[1], b[2], c[0], c[1], c[2]
        );
    }
    eprintln!("{} surfaces", surfaces.len());
    ExitCode::SUCCESS
}

use rip_reader::{ImportOptions, LayoutMode, ManualLayout, RipFile};
use std::env;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "Usage: {} <path-to-rip-file>... [--uv-set <N>] [--texture <N>] \
             [--import-anything] [--manual pos=0,1,2:nml=3,4,5:uv=6,7]",
            args[0]
        );
        std::process::exit(1);
    }

    let mut options = ImportOptions::default();
    let mut paths: Vec<&String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--uv-set" => {
                options.uv_set = parse_number_arg(&args, i, "--uv-set");
                i += 2;
            }
            "--texture" => {
                options.texture_index = parse_number_arg(&args, i, "--texture");
                i += 2;
            }
            "--import-anything" => {
                options.import_anything = true;
                i += 1;
            }
            "--manual" => {
                let Some(spec) = args.get(i + 1) else {
                    eprintln!("ERROR: --manual flag requires an argument.");
                    std::process::exit(1);
                };
                match parse_manual_layout(spec) {
                    Ok(layout) => options.layout = LayoutMode::Manual(layout),
                    Err(e) => {
                        eprintln!("ERROR: Invalid --manual layout: {}", e);
                        std::process::exit(1);
                    }
                }
                i += 2;
            }
            _ => {
                paths.push(&args[i]);
                i += 1;
            }
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: No input files given.");
        std::process::exit(1);
    }

    let mut failures = 0usize;
    for path in &paths {
        println!("Reading RIP file: {}", path);
        println!("{}", "=".repeat(60));

        match RipFile::read(path, &options) {
            Ok(file) => print_summary(&file, &options),
            Err(e) => {
                eprintln!("\nERROR: Failed to read RIP file '{}'", path);
                eprintln!("  {}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        eprintln!("\n{} of {} file(s) failed to import.", failures, paths.len());
        std::process::exit(1);
    }
}

fn print_summary(file: &RipFile, options: &ImportOptions) {
    println!("\nSUCCESS! Reading completed.");
    println!("{}", "=".repeat(60));

    println!("\nHeader:");
    println!("  Version: {}", file.header.version);
    println!("  Faces: {}", file.header.face_count);
    println!("  Vertices: {}", file.header.vertex_count);
    println!("  Vertex record size: {} bytes", file.header.vertex_record_size);

    println!("\nVertex attributes:");
    for (i, attr) in file.attributes.iter().enumerate() {
        println!(
            "  {}. {}[{}] at slot {}, {} slot(s), types {:?}",
            i + 1,
            attr.semantic,
            attr.semantic_index,
            attr.slot_offset,
            attr.slot_count,
            attr.field_types
        );
    }

    println!("\nResolved layout:");
    println!("  Position slots: {:?}", file.layout.position_slots());
    println!("  Normal slots: {:?}", file.layout.normal_slots());
    println!("  UV sets: {}", file.layout.uv_set_count());

    println!("\nTextures: {:?}", file.texture_files);
    println!("Shaders: {:?}", file.shader_files);
    println!("Selected texture: {}", file.selected_texture(options));

    println!("\nSample vertices (first 5):");
    let sample = file.geometry.positions.len().min(5);
    for i in 0..sample {
        let p = file.geometry.positions[i];
        println!(
            "  {}. pos=({:.4}, {:.4}, {:.4}, {:.4}) uv=({:.4}, {:.4})",
            i + 1,
            p[0],
            p[1],
            p[2],
            p[3],
            file.geometry.u[i],
            file.geometry.v[i]
        );
    }
    if file.geometry.positions.len() > sample {
        println!("  ... and {} more", file.geometry.positions.len() - sample);
    }
    println!();
}

fn parse_number_arg(args: &[String], flag_index: usize, flag: &str) -> usize {
    let Some(value) = args.get(flag_index + 1) else {
        eprintln!("ERROR: {} flag requires an argument.", flag);
        std::process::exit(1);
    };
    match value.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("ERROR: {} expects a non-negative number, got '{}'", flag, value);
            std::process::exit(1);
        }
    }
}

/// Parses `pos=0,1,2:nml=3,4,5:uv=6,7` into explicit slot overrides.
///
/// Each role is optional; an omitted role resolves to no slots.
fn parse_manual_layout(spec: &str) -> Result<ManualLayout, String> {
    let mut layout = ManualLayout::default();
    for segment in spec.split(':') {
        let Some((role, slots)) = segment.split_once('=') else {
            return Err(format!("expected <role>=<slots> segment, got '{}'", segment));
        };
        let parsed: Result<Vec<usize>, _> = slots.split(',').map(str::parse).collect();
        let parsed = parsed.map_err(|_| format!("invalid slot list '{}'", slots))?;
        match role {
            "pos" => layout.position = parsed,
            "nml" => layout.normal = parsed,
            "uv" => layout.texcoord = parsed,
            other => return Err(format!("unknown role '{}'", other)),
        }
    }
    Ok(layout)
}

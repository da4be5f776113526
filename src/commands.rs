use crate::binfmt;
use crate::gfx;
use crate::png;
use crate::raster::Raster;
use clap::Subcommand;
use std::fs;
use std::path::{Path, PathBuf};
use winit::{
    event::{Event, WindowEvent},
    event_loop::ControlFlow,
};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Display a .bin or .png image
    Open { file_path: PathBuf },
    /// Convert between image formats (.bin, .png)
    Convert {
        files: Vec<PathBuf>,
        #[arg(short, long, help = "Output file path (for single file conversion)")]
        output: Option<PathBuf>,
        #[arg(
            short = 't',
            long = "target",
            help = "Target file extension for batch conversion (bin, png)"
        )]
        target_extension: Option<String>,
    },
    /// Create a .bin or .png image from a dimension-prefixed RGBA byte stream on stdin
    Write {
        output_path: PathBuf,
        #[arg(short, long, default_value_t = false)]
        forever: bool,
        #[arg(
            short,
            long,
            action = clap::ArgAction::Set,
            default_value_t = true,
            help = "Number output files (pass --numbered false to reuse one path)"
        )]
        numbered: bool,
    },
    /// View a dimension-prefixed RGBA byte stream from stdin
    View,
}

impl Command {
    pub fn run(self) -> Result<(), String> {
        match self {
            Command::Open { file_path } => open(&file_path),
            Command::Convert {
                files,
                output,
                target_extension,
            } => convert(&files, output.as_ref(), target_extension.as_ref()),
            Command::Write {
                output_path,
                forever,
                numbered,
            } => write(forever, numbered, &output_path),
            Command::View => view(),
        }
    }
}

fn extension_of(path: &PathBuf) -> &str {
    path.extension()
        .unwrap_or_default()
        .to_str()
        .unwrap_or_default()
}

fn load(file_path: &PathBuf) -> Result<Raster, String> {
    let data = fs::read(file_path).map_err(|e| e.to_string())?;
    match extension_of(file_path) {
        "bin" => binfmt::parse_img(&data).map_err(|e| e.to_string()),
        "png" => png::parse_img(&data),
        _ => Err("Invalid file extension provided. Only .bin and .png are supported".into()),
    }
}

fn open(file_path: &PathBuf) -> Result<(), String> {
    let img = load(file_path)?;
    display(img, &file_path.display().to_string());
    Ok(())
}

fn display(img: Raster, title: &str) {
    let (mut gfx, event_loop) = gfx::Gfx::new(img.width, img.height, title);
    gfx.display(&img);
    gfx.render();
    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        if let Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } = event
        {
            *control_flow = ControlFlow::Exit;
        }
    });
}

fn convert(
    files: &[PathBuf],
    output: Option<&PathBuf>,
    target_extension: Option<&String>,
) -> Result<(), String> {
    if files.is_empty() {
        return Err("At least one input file is required".into());
    }

    if let Some(output_path) = output {
        if files.len() > 1 {
            return Err("--output applies to a single input file".into());
        }
        return convert_single(&files[0], output_path);
    }

    if files.len() >= 3 {
        let first_ext = extension_of(&files[0]).to_owned();
        for file in files.iter() {
            if extension_of(file) != first_ext {
                return Err("All input files must have the same extension".into());
            }
        }

        let target_ext = if let Some(target) = target_extension {
            target.as_str()
        } else {
            match first_ext.as_str() {
                "png" => "bin",
                _ => "png",
            }
        };

        for file_path in files {
            let output_path = file_path.with_extension(target_ext);
            convert_single(file_path, &output_path)?;
        }
        return Ok(());
    }

    Err("Invalid arguments: provide either 1-2 files with --output, or 3+ files with same extension".into())
}

fn convert_single(file_path: &PathBuf, output_path: &PathBuf) -> Result<(), String> {
    let img = load(file_path)?;

    let encoded_data = match extension_of(output_path) {
        "bin" => binfmt::encode_img(&img).map_err(|e| e.to_string())?,
        "png" => png::encode_img(&img)?,
        _ => return Err("Unsupported output format".into()),
    };

    fs::write(output_path, encoded_data).map_err(|e| e.to_string())
}

/// Read one frame of the pipeline's stream layout: 4-byte big-endian width,
/// 4-byte big-endian height, then `width*height*4` RGBA bytes.
fn read_stream_frame(input: &mut impl std::io::Read) -> Result<Raster, String> {
    let mut w_buf = [0u8; 4];
    let mut h_buf = [0u8; 4];
    input.read_exact(&mut w_buf).map_err(|e| e.to_string())?;
    input.read_exact(&mut h_buf).map_err(|e| e.to_string())?;
    let w = u32::from_be_bytes(w_buf);
    let h = u32::from_be_bytes(h_buf);

    let frame_size = (w as usize)
        .checked_mul(h as usize)
        .and_then(|s| s.checked_mul(4))
        .ok_or("Image dimensions too large")?;
    let mut frame = vec![0u8; frame_size];
    input.read_exact(&mut frame).map_err(|e| e.to_string())?;

    Ok(Raster::from_rgba(h, w, &frame))
}

/// Output path for one stream frame. Joining keeps a bare output filename
/// relative to the current directory; its parent is the empty path.
fn frame_path(dir: &Path, stem: &str, n: u32, extension: &str, numbered: bool) -> PathBuf {
    if numbered {
        dir.join(format!("{stem}{n:0>5}.{extension}"))
    } else {
        dir.join(format!("{stem}.{extension}"))
    }
}

fn write(forever: bool, numbered: bool, output_path: &PathBuf) -> Result<(), String> {
    use std::io;

    let mut input = io::BufReader::new(io::stdin());
    let extension = extension_of(output_path).to_owned();

    let path = output_path.parent().ok_or("No parent directory")?;
    let stem = output_path
        .file_stem()
        .unwrap_or_default()
        .to_str()
        .ok_or("Output file name is not valid UTF-8")?
        .to_owned();

    let mut n: u32 = 0;
    loop {
        n += 1;
        let img = read_stream_frame(&mut input)?;

        let out_path = frame_path(path, &stem, n, &extension, numbered);

        let encoded_data = match extension.as_str() {
            "bin" => binfmt::encode_img(&img).map_err(|e| e.to_string())?,
            "png" => png::encode_img(&img)?,
            _ => return Err("Unsupported output format.".into()),
        };
        fs::write(out_path, encoded_data).map_err(|e| e.to_string())?;

        if !forever {
            return Ok(());
        }
    }
}

fn view() -> Result<(), String> {
    use std::io;

    let mut input = io::BufReader::new(io::stdin());
    let img = read_stream_frame(&mut input)?;

    display(img, "Piped image");
    Ok(())
}

use argh::FromArgs;
use std::io::Write;
use std::path::{Path, PathBuf};

use panocube::image::Image;
use panocube::imgproc::{
    interpolation::InterpolationMode,
    panorama::{self, CubeFace, ProjectionError, RectilinearParams},
};
use panocube::io::{
    error::IoError,
    functional::{self as F, GenericImage},
    png,
};

#[derive(FromArgs)]
/// Project an equirectangular panorama onto the six faces of a cube map
struct Args {
    /// path to the equirectangular input image
    #[argh(positional)]
    image_path: PathBuf,

    /// directory where the faces are written
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    output_dir: PathBuf,

    /// side of each face in pixels, a quarter of the input width by default
    #[argh(option, short = 's')]
    face_size: Option<usize>,

    /// interpolation mode: nearest, bilinear or bicubic
    #[argh(option, short = 'i')]
    interpolation: Option<InterpolationMode>,

    /// file name prefix of the faces
    #[argh(option, short = 'p', default = "String::from(\"cube\")")]
    prefix: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let Some(image) = open_input(&args.image_path, &mut std::io::stdout())? else {
        eprintln!("Unable to open image file");
        std::process::exit(1);
    };

    let failed = match &image {
        GenericImage::Mono8(src) => generate_faces(src, &args, |path, face| {
            png::write_image_png_gray8(path, face)
        })?,
        GenericImage::Rgb8(src) => generate_faces(src, &args, |path, face| {
            png::write_image_png_rgb8(path, face)
        })?,
    };

    println!("Done");

    if !failed.is_empty() {
        let names = failed.iter().map(|f| f.name()).collect::<Vec<_>>();
        eprintln!("Failed to write faces: {}", names.join(", "));
        std::process::exit(1);
    }

    Ok(())
}

// decode the panorama and announce it; nothing is written to `out` when the
// file cannot be decoded
fn open_input(
    image_path: &Path,
    out: &mut impl Write,
) -> Result<Option<GenericImage>, std::io::Error> {
    let image = match F::read_image_any(image_path) {
        Ok(image) => image,
        Err(err) => {
            log::debug!("{err}");
            return Ok(None);
        }
    };

    writeln!(out, "Input image: {}", image_path.display())?;
    writeln!(out, "Input size: {}", image.size())?;

    Ok(Some(image))
}

// render the faces one after the other into a single buffer and write each one;
// returns the faces that could not be written
fn generate_faces<const C: usize>(
    src: &Image<u8, C>,
    args: &Args,
    write_png: impl Fn(&Path, &Image<u8, C>) -> Result<(), IoError>,
) -> Result<Vec<CubeFace>, ProjectionError> {
    let params = RectilinearParams {
        aspect_ratio: 1.0,
        output_height: args.face_size,
        interpolation: args.interpolation,
    };
    let face_size = panorama::rectilinear_size(src.size(), &params)?;
    let interpolation = args
        .interpolation
        .unwrap_or_else(|| InterpolationMode::for_channels(C));

    println!("Face size: {face_size}");
    log::debug!("interpolation: {interpolation}");

    let mut face_image = Image::<u8, C>::from_size_val(face_size, 0)?;
    let mut failed = Vec::new();

    for face in CubeFace::ALL {
        println!("Generating {face}");

        panorama::rectilinear_from_equirect(
            src,
            &mut face_image,
            face.direction(),
            params.aspect_ratio,
            interpolation,
        )?;

        let file_path = args.output_dir.join(face.file_name(&args.prefix));
        if let Err(err) = write_png(&file_path, &face_image) {
            eprintln!("Failed to write {face} to {}: {err}", file_path.display());
            failed.push(face);
        }
    }

    Ok(failed)
}

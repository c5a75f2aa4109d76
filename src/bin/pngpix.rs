//! Thin driver over the `pngpix` library: decode a PNG, optionally run a
//! few pixmap transforms, and write the result as PPM and/or ASCII art.
//!
//! `RUST_LOG=debug` shows the decode pipeline at work.

use pngpix::{write_ascii, write_ppm, PixResult, Pixmap, PngFile, Rgb8, ScaleMethod};

fn usage(program: &str) {
  println!("usage: {program} <input.png> [options]");
  println!();
  println!("options:");
  println!("  --ppm <out.ppm>        write the pixmap as binary PPM");
  println!("  --ascii <out.txt>      write the pixmap as ASCII art");
  println!("  --bg <r,g,b>           PPM background for RGBA input (default 0,0,0)");
  println!("  --gray                 alpha-keyed grayscale conversion");
  println!("  --desaturate           conventional grayscale conversion");
  println!("  --mono <threshold>     black/white threshold by luma");
  println!("  --rotate <cw|ccw>      rotate 90 degrees (repeatable)");
  println!("  --scale <WxH>          resize to W x H pixels");
  println!("  --method <name>        scaling method: nearest, bilinear, bicubic");
}

fn main() {
  env_logger::init();
  let args: Vec<String> = std::env::args().collect();
  if args.len() < 2 || args[1] == "--help" {
    usage(&args[0]);
    std::process::exit(2);
  }
  match run(&args[1], &args[2..]) {
    Ok(()) => (),
    Err(e) => {
      eprintln!("{}: {e}", args[1]);
      std::process::exit(1);
    }
  }
}

fn run(input: &str, options: &[String]) -> PixResult<()> {
  let png = PngFile::open(input)?;
  let mut pixmap = png.decode()?;

  let mut ppm_out: Option<&str> = None;
  let mut ascii_out: Option<&str> = None;
  let mut bg = Rgb8 { r: 0, g: 0, b: 0 };
  let mut scale_to: Option<(u32, u32)> = None;
  let mut method = ScaleMethod::Nearest;
  let mut rotations: Vec<bool> = Vec::new();
  let mut gray = false;
  let mut desaturate = false;
  let mut mono: Option<u8> = None;

  let mut it = options.iter();
  while let Some(opt) = it.next() {
    let mut value = || {
      it.next().ok_or_else(|| {
        log::error!("{opt} needs a value");
        pngpix::PixError::InvalidArgument
      })
    };
    match opt.as_str() {
      "--ppm" => ppm_out = Some(value()?),
      "--ascii" => ascii_out = Some(value()?),
      "--bg" => bg = parse_rgb(value()?)?,
      "--gray" => gray = true,
      "--desaturate" => desaturate = true,
      "--mono" => mono = Some(parse_num(value()?)?),
      "--rotate" => {
        rotations.push(match value()?.as_str() {
          "cw" => true,
          "ccw" => false,
          other => {
            log::error!("--rotate wants cw or ccw, not {other:?}");
            return Err(pngpix::PixError::InvalidArgument);
          }
        });
      }
      "--scale" => scale_to = Some(parse_dimensions(value()?)?),
      "--method" => {
        method = match value()?.as_str() {
          "nearest" => ScaleMethod::Nearest,
          "bilinear" => ScaleMethod::Bilinear,
          "bicubic" => ScaleMethod::Bicubic,
          other => {
            log::error!("unknown scaling method {other:?}");
            return Err(pngpix::PixError::InvalidArgument);
          }
        };
      }
      other => {
        log::error!("unknown option {other:?}");
        return Err(pngpix::PixError::InvalidArgument);
      }
    }
  }

  if let Some((w, h)) = scale_to {
    pixmap.scale(w, h, method)?;
  }
  for clockwise in rotations {
    if clockwise {
      pixmap.rotate_cw()?;
    } else {
      pixmap.rotate_ccw()?;
    }
  }
  if let Some(threshold) = mono {
    pixmap.to_monochrome(threshold)?;
  }
  if desaturate {
    pixmap.desaturate()?;
  }
  if gray {
    pixmap.to_grayscale()?;
  }

  if let Some(path) = ppm_out {
    write_ppm(&pixmap, path, bg)?;
    println!("wrote {path}");
  }
  if let Some(path) = ascii_out {
    write_ascii(&pixmap, path)?;
    println!("wrote {path}");
  }
  if ppm_out.is_none() && ascii_out.is_none() {
    report(&pixmap);
  }
  Ok(())
}

fn report(pixmap: &Pixmap) {
  println!(
    "{}x{} pixels, {} channels, bit depth {}, {} raster bytes",
    pixmap.width(),
    pixmap.height(),
    pixmap.n_channels(),
    pixmap.bit_depth(),
    pixmap.data().len()
  );
}

fn parse_num<T: std::str::FromStr>(s: &str) -> PixResult<T> {
  s.parse().map_err(|_| {
    log::error!("can't parse {s:?} as a number");
    pngpix::PixError::InvalidArgument
  })
}

fn parse_dimensions(s: &str) -> PixResult<(u32, u32)> {
  let mut it = s.splitn(2, 'x');
  match (it.next(), it.next()) {
    (Some(w), Some(h)) => Ok((parse_num(w)?, parse_num(h)?)),
    _ => {
      log::error!("dimensions must look like 640x480, got {s:?}");
      Err(pngpix::PixError::InvalidArgument)
    }
  }
}

fn parse_rgb(s: &str) -> PixResult<Rgb8> {
  let parts: Vec<&str> = s.split(',').collect();
  match parts[..] {
    [r, g, b] => Ok(Rgb8 { r: parse_num(r)?, g: parse_num(g)?, b: parse_num(b)? }),
    _ => {
      log::error!("background color must look like 255,255,255, got {s:?}");
      Err(pngpix::PixError::InvalidArgument)
    }
  }
}

use anyhow::Context;
use gwcore::PhaseProducts;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const HEADER: &str = "# Time    cumulative_phase    amplitude    omega";

/// `run.asc` becomes `run<suffix>.asc`, next to the input.
pub fn output_path_for(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input.file_stem().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

pub fn render_products<W: Write>(
    out: &mut W,
    products: &PhaseProducts,
    precision: usize,
) -> std::io::Result<()> {
    writeln!(out, "{}", HEADER)?;
    for (t, phase, amp, omega) in products.rows() {
        writeln!(
            out,
            "{:.p$} {:.p$} {:.p$} {:.p$}",
            t,
            phase,
            amp,
            omega,
            p = precision
        )?;
    }
    Ok(())
}

pub fn write_products(
    path: &Path,
    products: &PhaseProducts,
    precision: usize,
) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    render_products(&mut out, products, precision)
        .and_then(|_| out.flush())
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {} rows to {}", products.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_keeps_extension() {
        let path = output_path_for(Path::new("data/psi4_l2m2.asc"), "_phase_amp_omega");
        assert_eq!(path, PathBuf::from("data/psi4_l2m2_phase_amp_omega.asc"));

        let path = output_path_for(Path::new("strain.txt"), "_phase_amp_omega");
        assert_eq!(path, PathBuf::from("strain_phase_amp_omega.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn output_path_preserves_non_utf8_stem() {
        use std::os::unix::ffi::OsStrExt;

        let input = Path::new(std::ffi::OsStr::from_bytes(b"run\xff.asc"));
        let path = output_path_for(input, "_phase_amp_omega");
        assert_eq!(
            path.file_name().unwrap().as_bytes(),
            b"run\xff_phase_amp_omega.asc"
        );
    }

    #[test]
    fn rows_use_fixed_precision() {
        let products = PhaseProducts {
            time: vec![0.0, 0.5],
            cumulative_phase: vec![1.0, -2.25],
            amplitude: vec![5.0, 5.0],
            omega: vec![0.125, 0.125],
        };
        let mut buffer = Vec::new();
        render_products(&mut buffer, &products, 15).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[2],
            "0.500000000000000 -2.250000000000000 5.000000000000000 0.125000000000000"
        );
    }
}

use anyhow::{bail, Context};
use std::fs;
use std::path::Path;

/// Accepted input extensions.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["asc", "txt"];

/// Sorted, de-duplicated `(time, real, imag)` columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrainColumns {
    pub time: Vec<f64>,
    pub real: Vec<f64>,
    pub imag: Vec<f64>,
}

impl StrainColumns {
    pub fn len(&self) -> usize {
        self.time.len()
    }
}

pub fn ensure_supported_extension(path: &Path) -> anyhow::Result<()> {
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext));
    if !supported {
        bail!(
            "input file {} must have a '.asc' or '.txt' extension",
            path.display()
        );
    }
    Ok(())
}

/// Reads a whitespace-delimited strain file.
///
/// Lines starting with `#` and blank lines are skipped; only the first three
/// columns are used. Rows come back sorted by time with duplicate times removed
/// (the first row in sorted order wins).
pub fn read_ascii_file<P: AsRef<Path>>(path: P) -> anyhow::Result<StrainColumns> {
    let path_ref = path.as_ref();
    ensure_supported_extension(path_ref)?;
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading strain file {}", path_ref.display()))?;
    parse_columns(&contents).with_context(|| format!("parsing strain file {}", path_ref.display()))
}

pub fn parse_columns(contents: &str) -> anyhow::Result<StrainColumns> {
    let mut rows: Vec<[f64; 3]> = Vec::new();

    for (line_no, line) in contents.lines().enumerate() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let mut row = [0.0; 3];
        for slot in row.iter_mut() {
            let field = fields
                .next()
                .with_context(|| format!("line {}: expected 3 columns", line_no + 1))?;
            *slot = field
                .parse()
                .with_context(|| format!("line {}: invalid number '{}'", line_no + 1, field))?;
        }
        rows.push(row);
    }

    rows.sort_by(|lhs, rhs| lhs[0].total_cmp(&rhs[0]));
    rows.dedup_by(|later, earlier| later[0] == earlier[0]);

    let mut columns = StrainColumns {
        time: Vec::with_capacity(rows.len()),
        real: Vec::with_capacity(rows.len()),
        imag: Vec::with_capacity(rows.len()),
    };
    for [t, re, im] in rows {
        columns.time.push(t);
        columns.real.push(re);
        columns.imag.push(im);
    }

    log::debug!("parsed {} strain samples", columns.len());
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn parse_sorts_and_drops_duplicate_times() {
        let text = "# t re im\n2.0 0.5 0.5\n0.0 1.0 0.0\n\n1.0 0.0 1.0 9.9\n2.0 7.0 7.0\n";
        let columns = parse_columns(text).unwrap();
        assert_eq!(columns.time, vec![0.0, 1.0, 2.0]);
        assert_eq!(columns.real, vec![1.0, 0.0, 0.5]);
        assert_eq!(columns.imag, vec![0.0, 1.0, 0.5]);
    }

    #[test]
    fn parse_reports_short_line() {
        let err = parse_columns("0.0 1.0 0.0\n1.0 2.0\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn parse_reports_bad_number() {
        let err = parse_columns("0.0 one 0.0\n").unwrap_err();
        assert!(format!("{:#}", err).contains("invalid number 'one'"));
    }

    #[test]
    fn read_rejects_unknown_extension() {
        let err = read_ascii_file("strain.dat").unwrap_err();
        assert!(err.to_string().contains(".asc"));
    }

    #[test]
    fn read_loads_asc_file() {
        let mut temp = Builder::new().suffix(".asc").tempfile().unwrap();
        temp.write_all(b"# header\n0.0 1.0 0.0\n0.5 0.0 1.0\n1.0 -1.0 0.0\n")
            .unwrap();
        let columns = read_ascii_file(temp.path()).unwrap();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns.real[2], -1.0);
    }
}

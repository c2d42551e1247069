use csv::Writer;
use std::fs::File;
use std::io::{self, Write};

/// Saves the computed solution as tab-separated rows "t  u [ u_ex ]"; the
/// exact column is present only when an exact solution is configured.
pub fn save_solution_to_file(
    t: &[f64],
    u: &[f64],
    u_ex: Option<&[f64]>,
    filename: &str,
) -> io::Result<()> {
    assert_eq!(t.len(), u.len(), "grid and trajectory length mismatch");
    let mut file = File::create(filename)?;
    for i in 0..t.len() {
        match u_ex {
            Some(u_ex) => writeln!(file, "{}\t{}\t{}", t[i], u[i], u_ex[i])?,
            None => writeln!(file, "{}\t{}", t[i], u[i])?,
        }
    }
    Ok(())
}

pub fn save_solution_to_csv(
    t: &[f64],
    u: &[f64],
    u_ex: Option<&[f64]>,
    arg: &str,
    value: &str,
    filename: &str,
) -> io::Result<()> {
    assert_eq!(t.len(), u.len(), "grid and trajectory length mismatch");
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);

    let mut headers = vec![arg.to_string(), value.to_string()];
    if u_ex.is_some() {
        headers.push(format!("{}_exact", value));
    }
    writer.write_record(&headers)?;

    for i in 0..t.len() {
        let mut row_data = vec![t[i].to_string(), u[i].to_string()];
        if let Some(u_ex) = u_ex {
            row_data.push(u_ex[i].to_string());
        }
        writer.write_record(&row_data)?;
    }

    writer.flush()?;
    Ok(())
}

/// Saves the information needed for the convergence plot: for every
/// refinement a row "N0/Nj  e_j/e_0  N0/Nj  (N0/Nj)^2" - the normalized error
/// next to reference curves of slope one and two (errors are normalized).
pub fn save_convergence_to_file(
    N_ref: &[usize],
    errors: &[f64],
    filename: &str,
) -> io::Result<()> {
    assert_eq!(
        N_ref.len(),
        errors.len(),
        "refinements and errors length mismatch"
    );
    let mut file = File::create(filename)?;
    for i in 0..N_ref.len() {
        let h_ratio = N_ref[0] as f64 / N_ref[i] as f64;
        writeln!(
            file,
            "{}\t{}\t{}\t{}",
            h_ratio,
            errors[i] / errors[0],
            h_ratio,
            h_ratio * h_ratio
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_save_solution_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solution.dat");
        let path = path.to_str().unwrap();
        let t = vec![0.0, 0.5, 1.0];
        let u = vec![1.0, 2.0, 3.0];
        save_solution_to_file(&t, &u, None, path).unwrap();
        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "0.5\t2");
    }

    #[test]
    fn test_save_solution_with_exact_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solution.dat");
        let path = path.to_str().unwrap();
        let t = vec![0.0, 1.0];
        let u = vec![1.0, 2.0];
        let u_ex = vec![1.0, 2.5];
        save_solution_to_file(&t, &u, Some(&u_ex), path).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().nth(1).unwrap(), "1\t2\t2.5");
    }

    #[test]
    fn test_save_solution_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solution.csv");
        let path = path.to_str().unwrap();
        let t = vec![0.0, 1.0];
        let u = vec![5.0, 6.0];
        save_solution_to_csv(&t, &u, None, "t", "u", path).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("t,u"));
        assert!(content.contains("1,6"));
    }

    #[test]
    fn test_save_convergence_normalization() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("convergence.dat");
        let path = path.to_str().unwrap();
        let N_ref = vec![8, 16, 32];
        let errors = vec![4e-2, 1e-2, 2.5e-3];
        save_convergence_to_file(&N_ref, &errors, path).unwrap();
        let content = fs::read_to_string(path).unwrap();
        let first = content.lines().next().unwrap();
        // first row is fully normalized: ratios and reference curves all 1
        assert_eq!(first, "1\t1\t1\t1");
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_files_are_truncated_on_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solution.dat");
        let path = path.to_str().unwrap();
        let t_long = vec![0.0, 0.5, 1.0];
        let u_long = vec![1.0, 2.0, 3.0];
        save_solution_to_file(&t_long, &u_long, None, path).unwrap();
        let t_short = vec![0.0];
        let u_short = vec![9.0];
        save_solution_to_file(&t_short, &u_short, None, path).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::predicate;
use tempfile::tempdir;

#[test]
fn file_doesnt_exist() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("abundhist")?;
    cmd.arg("test/file/doesnt/exist.sig");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error opening test/file/doesnt/exist.sig"));

    Ok(())
}

#[test]
fn abundhist_csv_outputs() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let hist_path = dir.path().join("hist.csv");
    let abund_path = dir.path().join("abundances.csv");

    let mut cmd = Command::cargo_bin("abundhist")?;
    cmd.arg("tests/data/a.sig")
        .arg("tests/data/b.sig")
        .args(&["-k", "31"])
        .args(&["--bins", "5"])
        .arg("-o")
        .arg(&hist_path)
        .arg("--abundances")
        .arg(&abund_path);
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("1  [1]  ****"))
        .stderr(predicate::str::contains(
            "loaded 2 total signatures that matched ksize & molecule type",
        ));

    assert_eq!(
        fs::read_to_string(&hist_path)?,
        "count,n_count\n1,1\n2,0\n3,0\n4,0\n5,2\n"
    );
    assert_eq!(
        fs::read_to_string(&abund_path)?,
        "hashval,count\n1,5\n2,5\n3,1\n"
    );
    Ok(())
}

#[test]
fn abundhist_clamps_bins() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let hist_path = dir.path().join("hist.csv");

    let mut cmd = Command::cargo_bin("abundhist")?;
    cmd.arg("tests/data/b.sig")
        .args(&["-k", "31"])
        .args(&["--bins", "100"])
        .args(&["--max", "3"])
        .arg("-o")
        .arg(&hist_path);
    cmd.assert().success();

    assert_eq!(
        fs::read_to_string(&hist_path)?,
        "count,n_count\n1,1\n2,1\n3,0\n"
    );
    Ok(())
}

#[test]
fn abundhist_select_by_name() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let abund_path = dir.path().join("abundances.csv");

    let mut cmd = Command::cargo_bin("abundhist")?;
    cmd.arg("tests/data/a.sig")
        .arg("tests/data/b.sig")
        .args(&["--name", "B"])
        .args(&["--md5", "bbbb"])
        .arg("--abundances")
        .arg(&abund_path);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("selected 1 via name / md5 selectors"));

    assert_eq!(
        fs::read_to_string(&abund_path)?,
        "hashval,count\n1,2\n3,1\n"
    );
    Ok(())
}

#[test]
fn abundhist_quiet() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("abundhist")?;
    cmd.arg("tests/data/a.sig").arg("-q");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("5  [1]"))
        .stderr(predicate::str::is_empty());
    Ok(())
}

#[test]
fn abundhist_no_match_is_empty_data() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let hist_path = dir.path().join("hist.csv");

    let mut cmd = Command::cargo_bin("abundhist")?;
    cmd.arg("tests/data/a.sig")
        .args(&["--name", "nothing like this"])
        .arg("-o")
        .arg(&hist_path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no signatures matched"))
        .stderr(predicate::str::contains("no abundances to build a histogram from"));
    assert!(!hist_path.exists());
    Ok(())
}

#[test]
fn abundhist_no_match_with_max() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let hist_path = dir.path().join("hist.csv");

    let mut cmd = Command::cargo_bin("abundhist")?;
    cmd.arg("tests/data/a.sig")
        .args(&["--protein"])
        .args(&["--max", "4"])
        .args(&["--bins", "2"])
        .arg("-o")
        .arg(&hist_path);
    cmd.assert().success();

    assert_eq!(fs::read_to_string(&hist_path)?, "count,n_count\n2,0\n4,0\n");
    Ok(())
}

#[test]
fn abundhist_inverted_range() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("abundhist")?;
    cmd.arg("tests/data/a.sig").args(&["--min", "10", "--max", "2"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("min 10, max 2, bins 10"));
    Ok(())
}

#[test]
fn abundhist_zero_bins() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("abundhist")?;
    cmd.arg("tests/data/a.sig").args(&["--bins", "0"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid histogram range"));
    Ok(())
}

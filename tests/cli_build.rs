use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn command_build() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("blomat")?;
    let output = cmd
        .arg("build")
        .arg("tests/blosum/dense.fa")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(
        stdout,
        "  A C G T\n\
         A 0 0 0 0\n\
         C 0 1 -1 -1\n\
         G 0 -1 0 1\n\
         T 0 -1 1 0\n"
    );

    Ok(())
}

#[test]
fn command_build_deterministic_parallel() -> anyhow::Result<()> {
    let mut runs = vec![];
    for parallel in ["1", "2", "4"] {
        let mut cmd = Command::cargo_bin("blomat")?;
        let output = cmd
            .arg("build")
            .arg("tests/blosum/dense.fa")
            .arg("--parallel")
            .arg(parallel)
            .output()?;
        runs.push(output.stdout);
    }

    // bit-identical regardless of pool size
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[0], runs[2]);

    Ok(())
}

#[test]
fn command_build_empty_input() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("blomat")?;
    cmd.arg("build")
        .arg("tests/blosum/allgap.fa")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No usable blocks"));

    Ok(())
}

#[test]
fn command_build_degenerate_statistics() -> anyhow::Result<()> {
    // The six-sequence fixture has zero T mass at x = 0.75; the build must
    // refuse to emit NaN scores.
    let mut cmd = Command::cargo_bin("blomat")?;
    cmd.arg("build")
        .arg("tests/blosum/six.fa")
        .arg("--min-len")
        .arg("4")
        .arg("-x")
        .arg("0.75")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Log-odds undefined for pair (A, T)"));

    Ok(())
}

#[test]
fn command_build_threshold_validation() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("blomat")?;
    cmd.arg("build")
        .arg("tests/blosum/dense.fa")
        .arg("-x")
        .arg("1.5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--threshold"));

    Ok(())
}

use assert_cmd::prelude::*;
use std::process::Command;

#[test]
fn command_block() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("blomat")?;
    let output = cmd
        .arg("block")
        .arg("tests/blosum/dense.fa")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    // two blocks: the 8-column and the 6-column runs; the run with a gapped
    // column and the 3-column run are dropped
    assert_eq!(
        stdout,
        "AAGCCCAA\nTAAACCAC\nTCTGACTG\nGCCGAATA\nGGGATATA\nGGCAACGA\n\
         \n\
         CATGTG\nCGGCGA\nCCCTTG\nCGACAG\nTGACGC\nTTTCGC\n"
    );

    Ok(())
}

#[test]
fn command_block_min_len() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("blomat")?;
    let output = cmd
        .arg("block")
        .arg("tests/blosum/dense.fa")
        .arg("--min-len")
        .arg("7")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    // only the 8-column block survives
    assert_eq!(stdout.lines().count(), 6);
    assert!(stdout.starts_with("AAGCCCAA\n"));

    Ok(())
}

#[test]
fn command_block_all_gap() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("blomat")?;
    let output = cmd
        .arg("block")
        .arg("tests/blosum/allgap.fa")
        .output()?;

    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn command_block_multiple_infiles() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("blomat")?;
    let output = cmd
        .arg("block")
        .arg("tests/blosum/six.fa")
        .arg("tests/blosum/six.fa")
        .arg("--min-len")
        .arg("4")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    // the gap-free fixture is one block per file
    assert_eq!(stdout.lines().count(), 13);
    assert_eq!(stdout.matches("GAAC").count(), 2);

    Ok(())
}

//! End-to-end tests of the contig-localizer binary.
//!
//! `bwa` is replaced by a small shell script: `index` touches the `.bwt`
//! file, `mem` saves its stdin and replays a canned SAM file.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FAKE_BWA: &str = r#"#!/bin/sh
case "$1" in
  index)
    echo "[bwa_index] fake index of $2" >&2
    : > "$2.bwt"
    ;;
  mem)
    cat > "$FAKE_BWA_SEEDS"
    echo "[M::bwa_idx_load_from_disk] fake" >&2
    cat "$FAKE_BWA_SAM"
    ;;
  *)
    exit 2
    ;;
esac
"#;

const FAILING_BWA: &str = r#"#!/bin/sh
cat > /dev/null
echo "[E::bwa_idx_load_from_disk] fail to locate the index files" >&2
exit 1
"#;

const CONTIGS: &str = ">contig1 kvcc=1\nACGTTGCAAGGCTTACCGATGCATCGGATCCAAGTTCGAATGC\n";

const SAM_HEADER: &str = "@HD\tVN:1.6\tSO:unsorted\n@SQ\tSN:A\tLN:1000\n@SQ\tSN:B\tLN:500\n";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let fixture = Self { dir };

        fixture.write_script("bwa", FAKE_BWA);
        fixture.write_script("bwa-fail", FAILING_BWA);
        fs::write(fixture.path("contigs.fa"), CONTIGS).unwrap();

        let mut reference = String::new();
        for (name, len) in [("A", 1000), ("B", 500)] {
            reference.push_str(&format!(">{name} fake chromosome\n"));
            let seq: String = "GATTACA".chars().cycle().take(len).collect();
            reference.push_str(&seq);
            reference.push('\n');
        }
        fs::write(fixture.path("ref.fa"), reference).unwrap();

        fixture
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write_script(&self, name: &str, content: &str) {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn write_sam(&self, records: &[String]) {
        let mut sam = SAM_HEADER.to_string();
        for record in records {
            sam.push_str(record);
            sam.push('\n');
        }
        fs::write(self.path("hits.sam"), sam).unwrap();
    }

    fn index(&self) {
        fs::write(self.path("ref.fa.bwt"), b"").unwrap();
    }

    fn command(&self, bwa: &str) -> Command {
        let mut cmd = Command::cargo_bin("contig-localizer").unwrap();
        cmd.env("CONTIG_LOCALIZER_BWA", self.path(bwa))
            .env("FAKE_BWA_SAM", self.path("hits.sam"))
            .env("FAKE_BWA_SEEDS", self.path("seeds.fa"));
        cmd
    }

    fn localize(&self, bwa: &str) -> Command {
        let mut cmd = self.command(bwa);
        cmd.arg("localize")
            .arg(self.path("contigs.fa"))
            .arg(self.path("ref.fa"));
        cmd
    }
}

fn mapped(name: &str, seqid: &str, pos: usize) -> String {
    format!("{name}\t0\t{seqid}\t{pos}\t60\t31M\t*\t0\t0\t*\t*")
}

fn unmapped(name: &str) -> String {
    format!("{name}\t4\t*\t0\t0\t*\t*\t0\t0\t*\t*")
}

fn exists(path: &Path) -> bool {
    path.is_file()
}

#[test]
fn test_localize_extracts_clustered_regions() {
    let fixture = Fixture::new();
    fixture.write_sam(&[
        mapped("kmer0", "A", 101),
        mapped("kmer1", "A", 111),
        unmapped("kmer2"),
        mapped("kmer3", "A", 901),
    ]);

    fixture
        .localize("bwa")
        .args(["--max-diff", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains(">A_75-166\n"))
        .stdout(predicate::str::contains(">A_875-956\n"))
        .stdout(predicate::str::contains(">B_").not())
        .stderr(predicate::str::contains("BWA index not found"));

    assert!(exists(&fixture.path("ref.fa.bwt")));

    // 43 bp contig with 31 bp seeds: 13 windows, all distinct
    let seeds = fs::read_to_string(fixture.path("seeds.fa")).unwrap();
    assert_eq!(seeds.lines().count(), 26);
    assert!(seeds.starts_with(">kmer0\nACGTTGCAAGGCTTACCGATGCATCGGATCC\n"));
}

#[test]
fn test_localize_region_sequence() {
    let fixture = Fixture::new();
    fixture.index();
    fixture.write_sam(&[mapped("kmer0", "B", 1)]);

    let output = fixture
        .localize("bwa")
        .args(["--delta", "0", "--seed-size", "31"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let expected: String = "GATTACA".chars().cycle().take(31).collect();
    assert_eq!(stdout, format!(">B_0-31\n{expected}\n"));
}

#[test]
fn test_localize_no_matches() {
    let fixture = Fixture::new();
    fixture.index();
    fixture.write_sam(&[unmapped("kmer0"), unmapped("kmer1")]);

    fixture
        .localize("bwa")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no reference matches").count(1));
}

#[test]
fn test_localize_missing_reference_sequence() {
    let fixture = Fixture::new();
    fixture.index();
    fixture.write_sam(&[mapped("kmer0", "chrX", 50)]);

    fixture
        .localize("bwa")
        .assert()
        .failure()
        .stderr(predicate::str::contains("reference sequence not found: chrX"));
}

#[test]
fn test_localize_aligner_failure() {
    let fixture = Fixture::new();
    fixture.index();

    fixture
        .localize("bwa-fail")
        .assert()
        .failure()
        .stderr(predicate::str::contains("problem running BWA"))
        .stderr(predicate::str::contains("fail to locate the index files"));
}

#[test]
fn test_localize_tsv_output() {
    let fixture = Fixture::new();
    fixture.index();
    fixture.write_sam(&[mapped("kmer0", "A", 5), mapped("kmer1", "A", 5001)]);

    fixture
        .localize("bwa")
        .args(["--format", "tsv", "--max-diff", "0"])
        .assert()
        .success()
        .stdout("id\tseqid\tstart\tend\tlength\nA_0-1000\tA\t0\t1000\t1000\n");
}

#[test]
fn test_localize_json_output() {
    let fixture = Fixture::new();
    fixture.index();
    fixture.write_sam(&[mapped("kmer0", "A", 201)]);

    let output = fixture
        .localize("bwa")
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let regions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let regions = regions.as_array().unwrap();
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0]["id"], "A_175-256");
    assert_eq!(regions[0]["seqid"], "A");
    assert_eq!(regions[0]["start"], 175);
    assert_eq!(regions[0]["end"], 256);
    assert_eq!(regions[0]["sequence"].as_str().unwrap().len(), 81);
}

#[test]
fn test_localize_writes_output_file() {
    let fixture = Fixture::new();
    fixture.index();
    fixture.write_sam(&[mapped("kmer0", "A", 101)]);

    fixture
        .localize("bwa")
        .arg("--out")
        .arg(fixture.path("regions.fa"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let regions = fs::read_to_string(fixture.path("regions.fa")).unwrap();
    assert!(regions.starts_with(">A_75-156\n"));
}

#[test]
fn test_seeds_command() {
    let fixture = Fixture::new();
    fs::write(fixture.path("short.fa"), ">c1\nAAGGCC\n>c2\nGGCCTA\n").unwrap();

    fixture
        .command("bwa")
        .arg("seeds")
        .arg(fixture.path("short.fa"))
        .args(["--seed-size", "5"])
        .assert()
        .success()
        .stdout(">kmer0\nAAGGC\n>kmer1\nAGGCC\n>kmer2\nGCCTA\n");
}

#[test]
fn test_seeds_rejects_zero_seed_size() {
    let fixture = Fixture::new();

    fixture
        .command("bwa")
        .arg("seeds")
        .arg(fixture.path("contigs.fa"))
        .args(["--seed-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("seed size must be at least 1"));
}

#[test]
fn test_index_command_is_idempotent() {
    let fixture = Fixture::new();

    fixture
        .command("bwa")
        .arg("index")
        .arg(fixture.path("ref.fa"))
        .assert()
        .success()
        .stderr(predicate::str::contains("BWA index not found"));
    assert!(exists(&fixture.path("ref.fa.bwt")));

    fixture
        .command("bwa")
        .arg("index")
        .arg(fixture.path("ref.fa"))
        .assert()
        .success()
        .stderr(predicate::str::contains("BWA index not found").not());
}

#[test]
fn test_index_failure() {
    let fixture = Fixture::new();

    fixture
        .command("bwa-fail")
        .arg("index")
        .arg(fixture.path("ref.fa"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("problem running BWA"));
}

#[test]
fn test_localize_span_past_sequence_end() {
    let fixture = Fixture::new();
    fixture.index();
    fixture.write_sam(&[mapped("kmer0", "A", 9001)]);

    fixture
        .localize("bwa")
        .args(["--format", "tsv"])
        .assert()
        .success()
        .stdout("id\tseqid\tstart\tend\tlength\nA_8975-1000\tA\t8975\t1000\t0\n");
}

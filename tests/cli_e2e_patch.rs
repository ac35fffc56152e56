//! End-to-end tests for the patch command.
//!
//! Tests that clone, commit and push run real `git` against a local bare
//! repository and only run with `--features integration-tests`.

#[allow(dead_code)]
mod common;
#[allow(unused_imports)]
use common::prelude::*;

const WRITE_EXAMPLE: &str = "#!/bin/sh\necho 'patched' > example.txt\n";

#[test]
fn test_patch_dry_run_touches_nothing() {
    let fixture = TestFixture::new().with_patch("template", "patch.sh", WRITE_EXAMPLE);
    fixture
        .patchbot()
        .args([
            "--color",
            "never",
            "patch",
            "--repository-url",
            "git@gitlab.com:acme/api.git",
            "--working-directory",
            "work",
            "--branch-name",
            "feature",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN MODE"))
        .stdout(predicate::str::contains("apply template (patch.sh)"))
        .stdout(predicate::str::contains("on branch feature from main"));

    assert!(!fixture.child("work").exists());
}

#[test]
fn test_patch_verbose_prints_job() {
    let fixture = TestFixture::new().with_patch("template", "patch.sh", WRITE_EXAMPLE);
    fixture
        .patchbot()
        .args([
            "--color",
            "never",
            "patch",
            "--repository-url",
            "git@gitlab.com:acme/api.git",
            "--source-branch",
            "develop",
            "--branch-name",
            "feature",
            "--dry-run",
            "--verbose",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[REPO] Repository: git@gitlab.com:acme/api.git"))
        .stdout(predicate::str::contains("Branch: feature (from develop)"));
}

#[test]
fn test_patch_unknown_name_suggests_similar() {
    let fixture = TestFixture::new().with_patch("update-readme", "patch.sh", WRITE_EXAMPLE);
    fixture
        .patchbot()
        .args([
            "patch",
            "--repository-url",
            "git@gitlab.com:acme/api.git",
            "--patch-name",
            "update-readm",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Patch 'update-readm' not found"))
        .stderr(predicate::str::contains("Did you mean 'update-readme'?"));
}

#[test]
fn test_patch_with_two_mechanisms_is_ambiguous() {
    let fixture = TestFixture::new()
        .with_patch("template", "patch.sh", WRITE_EXAMPLE)
        .with_file("patches/template/patch.py", "print('hi')\n");
    fixture
        .patchbot()
        .args([
            "patch",
            "--repository-url",
            "git@gitlab.com:acme/api.git",
            "--working-directory",
            "work",
            "--dry-run",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Multiple patch files found"));
}

#[test]
fn test_patch_without_commit_message() {
    let fixture = TestFixture::new().with_file("patches/template/patch.sh", WRITE_EXAMPLE);
    fixture
        .patchbot()
        .args([
            "patch",
            "--repository-url",
            "git@gitlab.com:acme/api.git",
            "--dry-run",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Commit message file not found"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_patch_clone_failure() {
    let fixture = TestFixture::new().with_patch("template", "patch.sh", WRITE_EXAMPLE);
    let missing = fixture.child("missing.git");
    fixture
        .patchbot()
        .args([
            "patch",
            "--repository-url",
            &missing.to_string_lossy(),
            "--working-directory",
            "work",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cloning failed"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_patch_applies_and_pushes() {
    let fixture = TestFixture::new().with_patch("template", "patch.sh", WRITE_EXAMPLE);
    let origin = fixture.create_origin("api");

    fixture
        .patchbot()
        .args([
            "--color",
            "never",
            "patch",
            "--repository-url",
            &origin.to_string_lossy(),
            "--working-directory",
            "work",
            "--branch-name",
            "feature",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK]"))
        .stdout(predicate::str::contains("pushed branch feature"));

    assert_eq!(
        fixture.origin_file(&origin, "feature", "example.txt").as_deref(),
        Some("patched\n")
    );
    assert_eq!(fixture.origin_file(&origin, "main", "example.txt"), None);

    let subject = git(&origin, &["log", "-1", "--format=%s", "feature"]);
    assert_eq!(subject, "Add example file");
    assert!(fixture.child("work/api.git/.git").is_dir());
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_patch_without_changes_exits_zero() {
    let fixture = TestFixture::new().with_patch("template", "patch.sh", "#!/bin/sh\ntrue\n");
    let origin = fixture.create_origin("api");

    fixture
        .patchbot()
        .args([
            "--color",
            "never",
            "patch",
            "--repository-url",
            &origin.to_string_lossy(),
            "--working-directory",
            "work",
            "--branch-name",
            "feature",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to commit, no changes in repository"));

    let output = std::process::Command::new("git")
        .args(["rev-parse", "--verify", "--quiet", "feature"])
        .current_dir(&origin)
        .output()
        .unwrap();
    assert!(!output.status.success(), "feature branch must not be pushed");
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_patch_is_idempotent_after_merge() {
    let fixture = TestFixture::new().with_patch("template", "patch.sh", WRITE_EXAMPLE);
    let origin = fixture.create_origin("api");
    let url = origin.to_string_lossy().to_string();

    fixture
        .patchbot()
        .args(["patch", "--repository-url", &url, "-d", "work", "--branch-name", "first"])
        .assert()
        .success();
    fixture
        .patchbot()
        .args([
            "merge",
            "--repository-url",
            &url,
            "-d",
            "merge-work",
            "--source",
            "first",
            "--target",
            "main",
        ])
        .assert()
        .success();

    fixture
        .patchbot()
        .args(["patch", "--repository-url", &url, "-d", "work", "--branch-name", "second"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to commit"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_patch_exit_status_is_not_interpreted() {
    let fixture =
        TestFixture::new().with_patch("template", "patch.sh", "#!/bin/sh\nexit 3\n");
    let origin = fixture.create_origin("api");

    fixture
        .patchbot()
        .args([
            "patch",
            "--repository-url",
            &origin.to_string_lossy(),
            "-d",
            "work",
            "--branch-name",
            "feature",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to commit"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_patch_halt_without_terminal_commits() {
    let fixture = TestFixture::new().with_patch("template", "patch.sh", WRITE_EXAMPLE);
    let origin = fixture.create_origin("api");

    fixture
        .patchbot()
        .args([
            "--color",
            "never",
            "patch",
            "--repository-url",
            &origin.to_string_lossy(),
            "-d",
            "work",
            "--branch-name",
            "feature",
            "--halt-before-commit",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("pushed branch feature"))
        .stderr(predicate::str::contains("committing without confirmation"));

    assert_eq!(
        fixture.origin_file(&origin, "feature", "example.txt").as_deref(),
        Some("patched\n")
    );
}

use predicates::prelude::*;
mod common;
use common::TestEnv;

#[test]
fn test_version_command() {
    let env = TestEnv::new();

    env.cmd().arg("--version").assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));

    env.cmd().arg("-V").assert()
        .success()
        .stdout(predicate::str::contains("powertier"));
}

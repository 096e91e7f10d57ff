//! Tests for the dependency installer table.

use csa_cli::toolchain::{Arch, Dependency, Host, Os, Strategy, strategy};
use csa_core::Error;
use std::path::PathBuf;

fn host(os: Os, arch: Arch) -> Host {
    Host {
        os,
        arch,
        home: Some(PathBuf::from("/home/ferris")),
        cargo_home: None,
        coreutils: true,
    }
}

fn script(dependency: Dependency, host: &Host) -> String {
    match strategy(dependency, host).unwrap() {
        Strategy::Script(script) => script,
        other => panic!("expected a script, got {other:?}"),
    }
}

#[test]
fn test_rust_uses_rustup_script() {
    let linux = script(Dependency::Rust, &host(Os::Linux, Arch::X86_64));
    assert_eq!(
        linux,
        "curl --proto '=https' --tlsv1.3 https://sh.rustup.rs -sSf | bash -s -- -y --default-toolchain 1.65.0"
    );

    let mac = script(Dependency::Rust, &host(Os::MacOs, Arch::Aarch64));
    assert!(mac.contains("--tlsv1.2"));
}

#[test]
fn test_rust_on_windows_downloads_rustup_init() {
    let strategy = strategy(Dependency::Rust, &host(Os::Windows, Arch::X86_64)).unwrap();
    assert_eq!(
        strategy,
        Strategy::Installer {
            url: "https://static.rust-lang.org/rustup/dist/x86_64-pc-windows-msvc/rustup-init.exe"
                .to_string(),
            file_name: "rustup-init.exe".to_string(),
            args: vec!["--default-toolchain".to_string(), "1.65.0".to_string()],
        }
    );
}

#[test]
fn test_unsupported_os() {
    let err = strategy(Dependency::Rust, &host(Os::Other("freebsd".to_string()), Arch::X86_64))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "create-shuttle-app can't install Rust automatically on: freebsd"
    );
    assert!(err.problems()[0].contains("https://www.rust-lang.org/tools/install"));
}

#[test]
fn test_shuttle_release_binary() {
    let linux = script(Dependency::Shuttle, &host(Os::Linux, Arch::X86_64));
    assert!(linux.starts_with(
        "curl -s -OL https://github.com/shuttle-hq/shuttle/releases/download/v0.12.0/cargo-shuttle-v0.12.0-x86_64-unknown-linux-gnu.tar.gz && "
    ));
    assert!(linux.contains(
        "tar -xzf cargo-shuttle-v0.12.0-x86_64-unknown-linux-gnu.tar.gz cargo-shuttle-x86_64-unknown-linux-gnu-v0.12.0/cargo-shuttle && "
    ));
    assert!(linux.contains("\"/home/ferris/.cargo/bin/cargo-shuttle\""));
    assert!(linux.ends_with(
        "rm -rf cargo-shuttle-v0.12.0-x86_64-unknown-linux-gnu.tar.gz cargo-shuttle-x86_64-unknown-linux-gnu-v0.12.0"
    ));

    let mac = script(Dependency::Shuttle, &host(Os::MacOs, Arch::Aarch64));
    assert!(mac.contains("x86_64-apple-darwin"));
}

#[test]
fn test_shuttle_on_windows() {
    let with_coreutils = script(Dependency::Shuttle, &host(Os::Windows, Arch::X86_64));
    assert!(with_coreutils.contains("x86_64-pc-windows-msvc"));
    assert!(with_coreutils.contains("cargo-shuttle.exe"));

    let bare = Host {
        coreutils: false,
        ..host(Os::Windows, Arch::X86_64)
    };
    assert_eq!(
        strategy(Dependency::Shuttle, &bare).unwrap(),
        Strategy::Program {
            program: "cargo".to_string(),
            args: ["install", "cargo-shuttle", "--version", "0.12.0"]
                .map(str::to_string)
                .to_vec(),
        }
    );
}

#[test]
fn test_cargo_home_lookup() {
    let custom = Host {
        cargo_home: Some(PathBuf::from("/opt/cargo")),
        ..host(Os::Linux, Arch::X86_64)
    };
    assert_eq!(custom.cargo_bin_dir().unwrap(), PathBuf::from("/opt/cargo/bin"));

    let homeless = Host {
        home: None,
        ..host(Os::Linux, Arch::X86_64)
    };
    assert!(matches!(
        strategy(Dependency::Shuttle, &homeless),
        Err(Error::CargoHomeNotFound)
    ));
}

#[test]
fn test_protoc_release_archive() {
    let linux = script(Dependency::Protoc, &host(Os::Linux, Arch::Aarch64));
    assert!(linux.starts_with(
        "curl -OL https://github.com/protocolbuffers/protobuf/releases/download/v21.9/protoc-21.9-linux-aarch_64.zip && "
    ));
    assert!(linux.contains("sudo unzip -o protoc-21.9-linux-aarch_64.zip -d /usr/local bin/protoc"));
    assert!(linux.contains("'include/*'"));
    assert!(linux.ends_with("rm -f protoc-21.9-linux-aarch_64.zip"));

    let mac = script(Dependency::Protoc, &host(Os::MacOs, Arch::X86_64));
    assert!(mac.contains("protoc-21.9-osx-x86_64.zip"));
}

#[test]
fn test_protoc_unsupported_platforms() {
    let err = strategy(Dependency::Protoc, &host(Os::Windows, Arch::X86_64)).unwrap_err();
    assert!(err.problems()[0].contains("https://docs.shuttle.rs/support/installing-protoc#windows"));

    let err = strategy(Dependency::Protoc, &host(Os::Linux, Arch::Other("riscv64".to_string())))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "create-shuttle-app can't install protoc automatically on: riscv64"
    );
}

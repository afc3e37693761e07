//! Fills a `HostEnvironment` from the real process environment.

use std::path::PathBuf;

use crate::domain::HostEnvironment;

/// Environment variables consulted for the login name, in order.
const USER_VARS: &[&str] = &["LOGNAME", "USER", "LNAME", "USERNAME"];

/// Snapshot the current process environment.
#[must_use]
pub fn detect() -> HostEnvironment {
    let runtime_prefix = non_empty_var("VIRTUAL_ENV").map(PathBuf::from);
    let python = runtime_prefix
        .as_ref()
        .map(|prefix| prefix.join("bin").join("python3"))
        .filter(|p| p.is_file())
        .unwrap_or_else(|| PathBuf::from("python3"));

    HostEnvironment {
        runtime_prefix,
        exe_dir: std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(PathBuf::from)),
        home: dirs::home_dir(),
        user: current_user(),
        python,
    }
}

/// Login name of the invoking account: the first set variable in
/// [`USER_VARS`], else the passwd entry of the real uid.
#[must_use]
pub fn current_user() -> Option<String> {
    USER_VARS
        .iter()
        .find_map(|var| non_empty_var(var))
        .or_else(passwd_user)
}

#[cfg(unix)]
fn passwd_user() -> Option<String> {
    nix::unistd::User::from_uid(nix::unistd::getuid())
        .ok()
        .flatten()
        .map(|user| user.name)
}

#[cfg(not(unix))]
fn passwd_user() -> Option<String> {
    None
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// src/exec/session.rs

//! Detaching a child from the caller's session.

use tokio::process::Command;

/// Arrange for the child to start in a new session.
///
/// On unix the child calls `setsid()` between fork and exec, so it leads a
/// new session and process group and no longer receives signals aimed at the
/// caller's group or controlling terminal. On Windows the child gets a new
/// process group instead.
#[cfg(unix)]
pub(crate) fn configure_session(cmd: &mut Command, start_new_session: bool) {
    if !start_new_session {
        return;
    }

    // SAFETY: the closure runs in the forked child before exec and only
    // calls setsid(2), which is async-signal-safe.
    unsafe {
        cmd.pre_exec(|| {
            nix::unistd::setsid()
                .map(|_| ())
                .map_err(std::io::Error::from)
        });
    }
}

#[cfg(windows)]
pub(crate) fn configure_session(cmd: &mut Command, start_new_session: bool) {
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

    if start_new_session {
        cmd.creation_flags(CREATE_NEW_PROCESS_GROUP);
    }
}

#[cfg(not(any(unix, windows)))]
pub(crate) fn configure_session(_cmd: &mut Command, start_new_session: bool) {
    if start_new_session {
        tracing::debug!("start_new_session is not supported on this platform; ignoring");
    }
}

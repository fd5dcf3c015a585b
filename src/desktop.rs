/// Desktop background integration
///
/// Each platform delegates to its native mechanism:
/// - Windows: the IDesktopWallpaper COM interface (no admin rights needed)
/// - Everywhere else: the `wallpaper` crate, falling back to gsettings,
///   xfconf-query or feh on Linux desktops it does not handle
use std::path::Path;

use crate::error::{ApodError, Result};

/// Set the desktop background to the image at `path`
pub fn set_desktop_background(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(ApodError::Desktop(format!("{} does not exist", path.display())));
    }

    let path = std::path::absolute(path)?;
    tracing::info!(path = %path.display(), "setting desktop background");
    set_platform_background(&path)
}

#[cfg(target_os = "windows")]
fn set_platform_background(path: &Path) -> Result<()> {
    use windows::core::PCWSTR;
    use windows::Win32::System::Com::*;
    use windows::Win32::UI::Shell::*;

    let path_wide: Vec<u16> = path
        .to_str()
        .ok_or_else(|| ApodError::Desktop(format!("{} is not valid UTF-8", path.display())))?
        .encode_utf16()
        .chain(std::iter::once(0))
        .collect();

    unsafe {
        let _ = CoInitializeEx(None, COINIT_APARTMENTTHREADED);

        let result = (|| -> windows::core::Result<()> {
            let desktop_wallpaper: IDesktopWallpaper =
                CoCreateInstance(&DesktopWallpaper, None, CLSCTX_LOCAL_SERVER)?;
            // Null monitor id applies the image to every monitor
            desktop_wallpaper.SetWallpaper(PCWSTR::null(), PCWSTR::from_raw(path_wide.as_ptr()))
        })();

        CoUninitialize();
        result.map_err(|e| ApodError::Desktop(e.to_string()))
    }
}

#[cfg(not(target_os = "windows"))]
fn set_platform_background(path: &Path) -> Result<()> {
    let file_loc = path.to_str().ok_or_else(|| ApodError::Desktop(format!("{} is not valid UTF-8", path.display())))?;

    match wallpaper::set_from_path(file_loc) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::warn!(error = %e, "wallpaper crate failed");
            set_background_fallback(path, format!("could not set wallpaper: {}", e))
        }
    }
}

/// Linux desktops the `wallpaper` crate cannot drive are set by hand
#[cfg(all(unix, not(target_os = "macos")))]
fn set_background_fallback(path: &Path, _reason: String) -> Result<()> {
    let file_loc = path.to_string_lossy();

    match linux_desktop_environment().as_str() {
        "xfce" => {
            run_command(
                "xfconf-query",
                &["-c", "xfce4-desktop", "-p", "/backdrop/screen0/monitor0/image-path", "-s", &file_loc],
            )
        }
        "mate" => run_command("gsettings", &["set", "org.mate.background", "picture-filename", &file_loc]),
        "gnome" => {
            let uri = format!("file://{}", file_loc);
            run_command("gsettings", &["set", "org.gnome.desktop.background", "picture-uri", &uri])?;
            // Newer GNOME releases read a separate key in dark mode
            if let Err(e) = run_command(
                "gsettings",
                &["set", "org.gnome.desktop.background", "picture-uri-dark", &uri],
            ) {
                tracing::debug!(error = %e, "picture-uri-dark not supported");
            }
            Ok(())
        }
        _ => run_command("feh", &["--bg-fill", &file_loc]),
    }
}

#[cfg(not(any(target_os = "windows", all(unix, not(target_os = "macos")))))]
fn set_background_fallback(_path: &Path, reason: String) -> Result<()> {
    Err(ApodError::Desktop(reason))
}

/// Best guess at the running Linux desktop, from the usual session variables
#[cfg(all(unix, not(target_os = "macos")))]
fn linux_desktop_environment() -> String {
    let session = std::env::var("XDG_CURRENT_DESKTOP")
        .or_else(|_| std::env::var("DESKTOP_SESSION"))
        .unwrap_or_default()
        .to_lowercase();
    classify_desktop(&session).to_string()
}

#[cfg(all(unix, not(target_os = "macos")))]
fn classify_desktop(session: &str) -> &'static str {
    if session.contains("xfce") || session.contains("xubuntu") {
        "xfce"
    } else if session.contains("mate") {
        "mate"
    } else if ["gnome", "unity", "cinnamon", "ubuntu", "budgie", "pantheon"]
        .iter()
        .any(|name| session.contains(name))
    {
        "gnome"
    } else {
        "unknown"
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn run_command(program: &str, args: &[&str]) -> Result<()> {
    use std::process::Command;

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| ApodError::Desktop(format!("could not run {}: {}", program, e)))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(ApodError::Desktop(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let err = set_desktop_background(&tmp.path().join("missing.jpg")).unwrap_err();
        assert!(matches!(err, ApodError::Desktop(_)));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_classify_desktop() {
        assert_eq!(classify_desktop("ubuntu:gnome"), "gnome");
        assert_eq!(classify_desktop("xfce"), "xfce");
        assert_eq!(classify_desktop("mate"), "mate");
        assert_eq!(classify_desktop("x-cinnamon"), "gnome");
        assert_eq!(classify_desktop("i3"), "unknown");
    }
}

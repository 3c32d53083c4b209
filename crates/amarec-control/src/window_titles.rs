//! Visible top-level window titles from the desktop.

use amarec_control_core::WindowTitles;

/// [`WindowTitles`] backed by `EnumWindows`.
///
/// Fails closed: if enumeration fails the titles gathered so far (usually
/// none) are returned and a warning is logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopWindows;

#[cfg(target_os = "windows")]
impl WindowTitles for DesktopWindows {
    fn visible_titles(&self) -> Vec<String> {
        use windows::Win32::Foundation::LPARAM;
        use windows::Win32::UI::WindowsAndMessaging::EnumWindows;

        let mut titles: Vec<String> = Vec::new();

        // SAFETY: the callback only runs during this call and `titles`
        // outlives it.
        let result = unsafe {
            EnumWindows(
                Some(win32::collect_visible_title),
                LPARAM(&mut titles as *mut Vec<String> as isize),
            )
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "EnumWindows failed");
        }

        tracing::debug!(count = titles.len(), "Visible windows enumerated");

        titles
    }
}

#[cfg(not(target_os = "windows"))]
impl WindowTitles for DesktopWindows {
    fn visible_titles(&self) -> Vec<String> {
        tracing::warn!("Window enumeration is only available on Windows");
        Vec::new()
    }
}

#[cfg(target_os = "windows")]
mod win32 {
    use windows::Win32::Foundation::{BOOL, HWND, LPARAM, TRUE};
    use windows::Win32::UI::WindowsAndMessaging::{GetWindowTextW, IsWindowVisible};

    const TITLE_BUFFER_LEN: usize = 4096;

    pub(super) unsafe extern "system" fn collect_visible_title(
        hwnd: HWND,
        lparam: LPARAM,
    ) -> BOOL {
        // SAFETY: lparam is the `&mut Vec<String>` passed to EnumWindows.
        let titles = unsafe { &mut *(lparam.0 as *mut Vec<String>) };

        if !unsafe { IsWindowVisible(hwnd) }.as_bool() {
            return TRUE;
        }

        let mut buf = [0u16; TITLE_BUFFER_LEN];
        let len = unsafe { GetWindowTextW(hwnd, &mut buf) }.max(0) as usize;
        titles.push(String::from_utf16_lossy(&buf[..len]));

        TRUE
    }
}

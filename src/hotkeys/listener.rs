//! Global hotkey listener thread.
//!
//! RegisterHotKey binds hotkeys to the thread that owns the message
//! window, so a dedicated thread creates a hidden window, registers the
//! table below and pumps messages. Each WM_HOTKEY is translated to a
//! `HotkeyAction` and forwarded over an mpsc channel; the main thread is
//! the single consumer and runs each handler to completion before taking
//! the next event.

use anyhow::{anyhow, Result};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::OnceLock;
use std::thread;

use windows::core::w;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT,
    MOD_SHIFT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
    PostQuitMessage, RegisterClassW, TranslateMessage, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT,
    MSG, WM_HOTKEY, WNDCLASSW, WS_OVERLAPPEDWINDOW,
};

use super::{
    action_for_id, HotkeyAction, ID_CAL_1, ID_CAL_10, ID_CAL_100, ID_DUMP_PRICES, ID_OPTIMIZE,
    ID_QUIT, ID_READ_1, ID_READ_10, ID_READ_100, ID_SHOW_POINTER,
};

/// Channel into the dispatch loop. Set once by the listener thread.
static ACTIONS: OnceLock<Sender<HotkeyAction>> = OnceLock::new();

const VK_F1: u32 = 0x70;
const VK_F2: u32 = 0x71;
const VK_F3: u32 = 0x72;
const VK_F4: u32 = 0x73;
const VK_P: u32 = 0x50;
const VK_M: u32 = 0x4D;
const VK_ESCAPE: u32 = 0x1B;

/// (id, modifiers, virtual key) for every hotkey the helper owns.
const HOTKEY_TABLE: [(i32, HOT_KEY_MODIFIERS, u32); 10] = [
    (ID_READ_1, MOD_NOREPEAT, VK_F1),
    (ID_READ_10, MOD_NOREPEAT, VK_F2),
    (ID_READ_100, MOD_NOREPEAT, VK_F3),
    (ID_OPTIMIZE, MOD_NOREPEAT, VK_F4),
    (ID_CAL_1, HOT_KEY_MODIFIERS(MOD_CONTROL.0 | MOD_ALT.0 | MOD_NOREPEAT.0), VK_F1),
    (ID_CAL_10, HOT_KEY_MODIFIERS(MOD_CONTROL.0 | MOD_ALT.0 | MOD_NOREPEAT.0), VK_F2),
    (ID_CAL_100, HOT_KEY_MODIFIERS(MOD_CONTROL.0 | MOD_ALT.0 | MOD_NOREPEAT.0), VK_F3),
    (ID_DUMP_PRICES, HOT_KEY_MODIFIERS(MOD_CONTROL.0 | MOD_SHIFT.0 | MOD_NOREPEAT.0), VK_P),
    (ID_SHOW_POINTER, HOT_KEY_MODIFIERS(MOD_CONTROL.0 | MOD_SHIFT.0 | MOD_NOREPEAT.0), VK_M),
    (ID_QUIT, MOD_NOREPEAT, VK_ESCAPE),
];

/// Starts the listener thread and returns the action receiver.
///
/// Blocks until the thread has registered every hotkey; a registration
/// failure (another instance running, a hotkey taken by other software)
/// is returned to the caller and is fatal at startup.
pub fn spawn_listener() -> Result<Receiver<HotkeyAction>> {
    let (sender, receiver) = channel();
    ACTIONS
        .set(sender)
        .map_err(|_| anyhow!("Hotkey listener already started"))?;

    let (ready_tx, ready_rx) = channel::<Result<()>>();

    thread::spawn(move || {
        let hwnd = match setup_window_and_hotkeys() {
            Ok(hwnd) => {
                let _ = ready_tx.send(Ok(()));
                hwnd
            }
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                return;
            }
        };

        run_message_pump();
        teardown(hwnd);
    });

    ready_rx
        .recv()
        .map_err(|_| anyhow!("Hotkey listener thread died during setup"))??;

    Ok(receiver)
}

fn setup_window_and_hotkeys() -> Result<HWND> {
    let hwnd = create_message_window()?;

    for (id, modifiers, vk) in HOTKEY_TABLE {
        unsafe {
            RegisterHotKey(hwnd, id, modifiers, vk)
                .map_err(|e| anyhow!("Failed to register hotkey id {}: {}", id, e))?;
        }
    }

    Ok(hwnd)
}

fn run_message_pump() {
    let mut msg = MSG::default();
    unsafe {
        while GetMessageW(&mut msg, HWND::default(), 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

fn teardown(hwnd: HWND) {
    unsafe {
        for (id, _, _) in HOTKEY_TABLE {
            let _ = UnregisterHotKey(hwnd, id);
        }
        let _ = DestroyWindow(hwnd);
    }
}

fn create_message_window() -> Result<HWND> {
    unsafe {
        let hinstance = GetModuleHandleW(None)?;
        let class_name = w!("DofusPriceHelperClass");

        let wc = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(window_proc),
            hInstance: hinstance.into(),
            lpszClassName: class_name,
            ..Default::default()
        };

        let atom = RegisterClassW(&wc);
        if atom == 0 {
            return Err(anyhow!("Failed to register window class"));
        }

        let hwnd = CreateWindowExW(
            Default::default(),
            class_name,
            w!("Dofus Price Helper"),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            None,
            None,
            hinstance,
            None,
        )?;

        Ok(hwnd)
    }
}

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe {
        match msg {
            WM_HOTKEY => {
                let hotkey_id = wparam.0 as i32;
                if let Some(action) = action_for_id(hotkey_id) {
                    if let Some(sender) = ACTIONS.get() {
                        let _ = sender.send(action);
                    }
                    if action == HotkeyAction::Quit {
                        PostQuitMessage(0);
                    }
                }
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}

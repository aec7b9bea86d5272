fn main() {
    // The binary only does anything when Trunk builds it for the browser.
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        leptos::mount::mount_to_body(heptle::app::App);
    }
}

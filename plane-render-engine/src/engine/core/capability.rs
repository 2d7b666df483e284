const UNSUPPORTED_MESSAGE: &str =
    "No hardware-accelerated rendering adapter is available; the viewer will not start.";

/// Blocking adapter probe for native builds. Any backend and power
/// preference is acceptable.
#[cfg(not(target_arch = "wasm32"))]
pub fn hardware_rendering_available() -> bool {
    let instance = wgpu::Instance::default();
    let adapter =
        pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()));
    match &adapter {
        Some(adapter) => println!("Rendering adapter: {}", adapter.get_info().name),
        None => eprintln!("Adapter request returned no adapter"),
    }
    adapter.is_some()
}

/// Async adapter probe for WASM, awaited inside the `spawn_local` entry.
#[cfg(target_arch = "wasm32")]
pub async fn hardware_rendering_available_async() -> bool {
    let instance = wgpu::Instance::default();
    instance
        .request_adapter(&wgpu::RequestAdapterOptions::default())
        .await
        .is_some()
}

/// Substitute a static diagnostic for the interactive scene. On the web the
/// message lands in the document body where the canvas would have been.
pub fn report_unsupported() {
    eprintln!("{UNSUPPORTED_MESSAGE}");

    #[cfg(target_arch = "wasm32")]
    {
        if let Some(document) = web_sys::window().and_then(|window| window.document()) {
            if let (Ok(warning), Some(body)) = (document.create_element("div"), document.body()) {
                warning.set_text_content(Some(UNSUPPORTED_MESSAGE));
                let _ = body.append_child(&warning);
            }
        }
    }
}

mod engine;
mod tools;

use engine::core::app_setup::create_app;
use engine::core::capability;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if !capability::hardware_rendering_available() {
            capability::report_unsupported();
            return;
        }
        create_app().run();
    }

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async {
            if capability::hardware_rendering_available_async().await {
                create_app().run();
            } else {
                capability::report_unsupported();
            }
        });
    }
}

use surface_overlay::engine::core::app_setup::create_app;

fn main() {
    let mut app = create_app();
    app.run();
}

use anyhow::Result;
use glam::Vec2;
use log::{error, info, warn};
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod config;
mod core;
mod engine;
mod game;

use config::{GameConfig, CONFIG_FILE};
use engine::assets::AssetLoader;
use engine::game_loop::GameLoop;
use engine::input::{Action, InputConfig, InputManager};
use engine::physics::DebugRenderer;
use engine::renderer::Renderer;
use game::Level;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Rusted Platformer...");

    let config = GameConfig::load(CONFIG_FILE)?;
    let mut level = Level::load(&config.levels_dir, &config.level)?;
    info!("Playing level {}", level.name());

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let logical_size = Vec2::new(config.width as f32, config.height as f32);
    let mut renderer = pollster::block_on(Renderer::new(
        window.clone(),
        logical_size,
        AssetLoader::new(&config.assets_dir),
    ))?;

    let mut input = InputManager::new(InputConfig::default());
    let mut game_loop = GameLoop::new();
    let mut debug_renderer = DebugRenderer::new(config.debug_overlay);

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => renderer.resize(physical_size),
                WindowEvent::Focused(false) => input.reset(),
                WindowEvent::KeyboardInput { event, .. } => input.process_keyboard_event(&event),
                WindowEvent::RedrawRequested => {
                    let player_input = input.player();
                    if player_input.just_pressed(Action::Quit) {
                        info!("Quit requested, shutting down...");
                        elwt.exit();
                        return;
                    }
                    if player_input.just_pressed(Action::Pause) {
                        game_loop.toggle_pause();
                    }
                    if player_input.just_pressed(Action::ToggleDebug) {
                        debug_renderer.toggle();
                    }

                    let dt = game_loop.begin_frame();
                    if !game_loop.is_paused() {
                        level.step(dt, input.player());
                    }

                    level.draw(&mut renderer);
                    debug_renderer.draw(
                        &mut renderer,
                        level.walls(),
                        &level.player().body,
                        level.debug_probe(),
                    );

                    if let Err(e) = renderer.render() {
                        match e.downcast_ref::<wgpu::SurfaceError>() {
                            Some(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                renderer.reconfigure()
                            }
                            Some(wgpu::SurfaceError::OutOfMemory) => {
                                error!("GPU out of memory, shutting down");
                                elwt.exit();
                            }
                            Some(wgpu::SurfaceError::Timeout) => warn!("Surface timeout"),
                            _ => error!("Render error: {:#}", e),
                        }
                    }

                    input.update();
                }
                _ => {}
            },
            Event::AboutToWait => window.request_redraw(),
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

//! HUD plugin: score bar, cheat states, and the game-over overlay.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use arena_core::world::PlayerCommand;

use crate::simulation::{SimSet, SimWorld};

/// Plugin for the game HUD using egui.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Update, hud_bar.in_set(SimSet::Render))
            .add_systems(Update, game_over_overlay.after(hud_bar));
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

/// Top status bar: mode, scores, alive counts, cheat toggles, and
/// control hints.
fn hud_bar(sim: Res<SimWorld>, mut egui_contexts: EguiContexts) {
    let Some(ctx) = egui_contexts.try_ctx_mut() else {
        return;
    };
    let hud = sim.0.hud();

    egui::TopBottomPanel::top("hud_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(format!("Mode: {}", hud.mode_label)).strong());
            ui.separator();
            ui.label(format!("Score A: {}    Score B: {}", hud.score_a, hud.score_b));
            ui.separator();
            ui.label(format!("Alive A: {}   B: {}", hud.alive_a, hud.alive_b));
            ui.separator();
            ui.label(format!(
                "Cheats: U unlimited ammo [{}], F freeze (5s){}, T auto-target [{}]",
                on_off(hud.unlimited_ammo),
                if hud.frozen { " [FROZEN]" } else { "" },
                on_off(hud.auto_target),
            ));
        });
        ui.label("Arrow keys move your side. Left mouse / Space to fire. J/K rotate, R restart.");
    });
}

/// Full-screen overlay once the match is decided.
fn game_over_overlay(
    mut sim: ResMut<SimWorld>,
    mut egui_contexts: EguiContexts,
    keyboard: Res<ButtonInput<KeyCode>>,
) {
    let hud = sim.0.hud();
    if !hud.game_over {
        return;
    }

    let Some(ctx) = egui_contexts.try_ctx_mut() else {
        return;
    };

    let winner = hud.winner.map_or("-", |side| side.label());

    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180)))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(200.0);

                ui.label(
                    egui::RichText::new("GAME OVER")
                        .size(64.0)
                        .color(egui::Color32::from_rgb(220, 180, 40))
                        .strong(),
                );
                ui.add_space(20.0);
                ui.label(
                    egui::RichText::new(format!("Winner: Team {winner}"))
                        .size(32.0)
                        .color(egui::Color32::WHITE),
                );
                ui.add_space(40.0);

                let restart_btn = ui.add_sized(
                    [200.0, 50.0],
                    egui::Button::new(
                        egui::RichText::new("Play Again (R)")
                            .size(20.0)
                            .color(egui::Color32::WHITE),
                    )
                    .fill(egui::Color32::from_rgb(60, 60, 80)),
                );

                if restart_btn.clicked() || keyboard.just_pressed(KeyCode::KeyR) {
                    sim.0.queue_command(PlayerCommand::Reset);
                }
            });
        });
}

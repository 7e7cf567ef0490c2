//! # Viscid
//!
//! Headless host for the liquid simulation. Owns an in-memory world, paces
//! simulation passes off a game tick clock and drains pending flow on shutdown.

use std::time::Duration;

use anyhow::bail;
use tokio::select;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use viscid_core::command::CommandDispatcher;
use viscid_core::command::context::CommandContext;
use viscid_core::command::sender::CommandSender;
use viscid_core::config::LiquidConfig;
use viscid_core::events::{EventOutcome, LiquidEvent, handle_event};
use viscid_core::ticks::FlowTicker;
use viscid_core::{LiquidSimulation, MemoryGrid};
use viscid_registry::{LiquidType, Material};
use viscid_utils::BlockPos;
use viscid_utils::math::Vector3;

/// The host: world, simulation and tick clock.
pub struct ViscidServer {
    /// The cancellation token for graceful shutdown.
    pub cancel_token: CancellationToken,
    config: LiquidConfig,
    grid: MemoryGrid,
    simulation: LiquidSimulation,
    ticker: FlowTicker,
    dispatcher: CommandDispatcher,
}

impl ViscidServer {
    /// Creates a host with an empty world.
    #[must_use]
    pub fn new(config: LiquidConfig) -> Self {
        log::info!(
            "Starting Viscid (flow rate {}, a pass every {} ticks of {}ms)",
            config.flow_rate,
            config.ticks_per_flow,
            config.tick_millis
        );

        Self {
            cancel_token: CancellationToken::new(),
            simulation: LiquidSimulation::new(&config),
            ticker: FlowTicker::new(config.ticks_per_flow),
            grid: MemoryGrid::new(),
            dispatcher: CommandDispatcher::default(),
            config,
        }
    }

    /// Creates a host with the demo world: a stone basin fed by an infinite
    /// water spring on a ledge, and a lava pour into a separate pit.
    pub fn demo(config: LiquidConfig) -> anyhow::Result<Self> {
        let mut server = Self::new(config);

        server.grid.fill(
            BlockPos::new(-1, -1, -1),
            BlockPos::new(16, 6, 16),
            Material::STONE,
        );
        server.grid.fill(
            BlockPos::new(0, 0, 0),
            BlockPos::new(15, 6, 15),
            Material::AIR,
        );
        server.grid.fill(
            BlockPos::new(0, 0, 0),
            BlockPos::new(2, 4, 2),
            Material::STONE,
        );

        let spring = BlockPos::new(1, 5, 1);
        server.place(spring, LiquidType::Water, 8);

        // Stand above the spring and look down at it
        let sender = CommandSender::Player {
            eye: Vector3::new(1.5, 7.6, 1.5),
            look: Vector3::new(0.0, -1.0, 0.0),
        };
        if !server.run_command(sender, "makeinfinitesource")? {
            bail!("spring at {spring} was not made infinite");
        }

        server.grid.fill(
            BlockPos::new(20, -1, 0),
            BlockPos::new(24, 3, 4),
            Material::STONE,
        );
        server.grid.fill(
            BlockPos::new(21, 0, 1),
            BlockPos::new(23, 3, 3),
            Material::AIR,
        );
        for y in 1..=3 {
            server.place(BlockPos::new(22, y, 2), LiquidType::Lava, 8);
        }

        Ok(server)
    }

    /// Places liquid as a player would and forwards the placement.
    pub fn place(&mut self, pos: BlockPos, liquid: LiquidType, level: u8) {
        self.grid.place_liquid(pos, liquid, level);
        self.handle_event(LiquidEvent::Place { pos });
    }

    /// Forwards a world event to the simulation.
    pub fn handle_event(&mut self, event: LiquidEvent) -> EventOutcome {
        handle_event(&mut self.simulation, &self.grid, event)
    }

    /// Runs a command on behalf of `sender`.
    pub fn run_command(
        &mut self,
        sender: CommandSender,
        command: &str,
    ) -> anyhow::Result<bool> {
        let mut context =
            CommandContext::new(sender, &self.grid, self.simulation.infinite_sources_mut());
        Ok(self.dispatcher.execute(&mut context, command)?)
    }

    /// The world.
    #[must_use]
    pub fn grid(&self) -> &MemoryGrid {
        &self.grid
    }

    /// The simulation.
    #[must_use]
    pub fn simulation(&self) -> &LiquidSimulation {
        &self.simulation
    }

    /// Runs the tick loop until cancelled, then drains pending flow.
    pub async fn run(&mut self) {
        log::info!("Started Viscid");

        let cancel_token = self.cancel_token.clone();
        let mut clock = interval(Duration::from_millis(self.config.tick_millis));
        clock.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            select! {
                () = cancel_token.cancelled() => {
                    break;
                }
                _ = clock.tick() => {
                    if let Some(report) = self.ticker.tick(&mut self.simulation, &mut self.grid)
                        && report.failed > 0
                    {
                        log::warn!(
                            "{} liquid blocks failed on game tick {}",
                            report.failed,
                            self.ticker.game_tick()
                        );
                    }
                }
            }
        }

        self.shutdown();
    }

    /// Drains the active set so no flow is left half-applied.
    pub fn shutdown(&mut self) {
        let pending = self.simulation.active().len();
        let passes = self
            .simulation
            .drain(&mut self.grid, self.config.drain_passes);
        log::info!(
            "Drained {pending} active liquid blocks in {passes} passes ({} infinite sources)",
            self.simulation.infinite_sources().len()
        );
    }

    /// Stops the tick loop.
    pub fn stop(&self) {
        self.cancel_token.cancel();
    }
}

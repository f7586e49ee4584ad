use game_engine::{ActionRejected, GameEngine};
use shared::{
    domain::{PlayerId, PLAYER_COUNT},
    protocol::{ClientRequest, ServerEvent},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

pub(crate) struct Room {
    engine: GameEngine,
    participants: [Option<UnboundedSender<ServerEvent>>; PLAYER_COUNT],
}

impl Room {
    pub(crate) fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            participants: [None, None],
        }
    }

    pub(crate) fn join(&mut self, player: PlayerId, outbound: UnboundedSender<ServerEvent>) {
        let _ = outbound.send(ServerEvent::PlayerId { id: player });
        self.participants[player.index()] = Some(outbound);
    }

    pub(crate) fn leave(&mut self, player: PlayerId) {
        self.participants[player.index()] = None;
    }

    pub(crate) fn start(&mut self) -> Result<(), ActionRejected> {
        let event = self.engine.start()?;
        info!("both players connected, game started");
        self.broadcast(&event);
        Ok(())
    }

    pub(crate) fn apply(&mut self, player: PlayerId, request: &ClientRequest) {
        match self.engine.apply(player, request) {
            Ok(event) => {
                log_accepted(&event);
                self.broadcast(&event);
            }
            Err(reason) => {
                debug!(%player, request = request.kind(), %reason, "action rejected");
            }
        }
    }

    pub(crate) fn broadcast(&self, event: &ServerEvent) {
        for (index, outbound) in self.participants.iter().enumerate() {
            let Some(outbound) = outbound else {
                continue;
            };
            if outbound.send(event.clone()).is_err() {
                debug!(player = index, event = event.kind(), "participant gone, event dropped");
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &GameEngine {
        &self.engine
    }
}

fn log_accepted(event: &ServerEvent) {
    match event {
        ServerEvent::DiceResult {
            dice,
            player,
            rolls_left,
        } => info!(%player, %dice, rolls_left, "dice rolled"),
        ServerEvent::TurnEnd {
            category,
            score,
            player,
            game_state,
        } => info!(
            %player,
            %category,
            score,
            round = game_state.round,
            "category scored"
        ),
        ServerEvent::GameEnd { winner, scores } => {
            info!(%winner, first = scores[0], second = scores[1], "game over")
        }
        ServerEvent::PlayerId { .. } | ServerEvent::GameStart(_) => {}
    }
}

use battlefield::app::{
    ActionStates, BattleField, BattlefieldEvent, GuiComposite, InputAction, OrderTargetMouse,
};
use battlefield::geometry::{CellCoord, ScreenPoint, Vec2, CELL_SIZE_PX};
use battlefield::world::{
    Entity, EntityData, EntityId, EntityProvider, EntityRepository, FactionColor, Footprint,
    Player, PlayerId,
};
use battlefield::DrawSurface;
use tracing::{debug, info};

use super::config::{ConfigLoadError, SkirmishConfig};

pub(crate) const HUMAN: PlayerId = PlayerId(0);
pub(crate) const CPU: PlayerId = PlayerId(1);

const HARVEST_CREDITS_PER_SECOND: f32 = 12.0;
const WINDTRAP_COST: i32 = 300;
const REVEAL_RADIUS_CELLS: i32 = 4;

fn windtrap() -> EntityData {
    EntityData::new("windtrap")
        .with_footprint(2, 2)
        .with_power_production(100)
}

fn construction_yard() -> EntityData {
    EntityData::new("construction_yard")
        .with_footprint(2, 2)
        .with_power_consumption(30)
}

fn trike() -> EntityData {
    EntityData::new("trike")
}

/// Stand-in for the sidebar: remembers which builder is open.
#[derive(Debug, Default)]
pub(crate) struct Sidebar {
    pub(crate) builder_open_for: Option<EntityId>,
    pub(crate) builders_opened: u32,
    pub(crate) placements: u32,
}

impl GuiComposite for Sidebar {
    fn entity_selected(&mut self, entity: &Entity) {
        info!(entity = entity.id.0, name = %entity.data.name, "builder_opened");
        self.builder_open_for = Some(entity.id);
        self.builders_opened += 1;
    }

    fn all_entity_builders_deselected(&mut self) {
        if let Some(previous) = self.builder_open_for.take() {
            debug!(entity = previous.0, "builders_closed");
        }
    }

    fn entity_placed_on_map(&mut self, entity: &Entity) {
        info!(entity = entity.id.0, name = %entity.data.name, "structure_placed");
        self.placements += 1;
    }
}

/// One scripted input, applied at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ScriptStep {
    Keys(ActionStates),
    HoverCell(CellCoord),
    DragToCell(CellCoord),
    ReleaseLeft,
    ClickLeft,
    ClickRight,
    EnterOrderTarget,
    PlaceWindtrapAtCell(CellCoord),
    CenterOnCell(CellCoord),
}

/// Click a unit, box-select a group, order it somewhere, build a windtrap,
/// then scroll and recentre.
pub(crate) fn default_script() -> Vec<(u32, ScriptStep)> {
    let scroll = ActionStates::default()
        .with_down(InputAction::MoveRight)
        .with_down(InputAction::MoveDown);
    vec![
        (0, ScriptStep::HoverCell(CellCoord::new(3, 5))),
        (2, ScriptStep::ClickLeft),
        (4, ScriptStep::DragToCell(CellCoord::new(2, 4))),
        (5, ScriptStep::DragToCell(CellCoord::new(7, 7))),
        (6, ScriptStep::ReleaseLeft),
        (8, ScriptStep::HoverCell(CellCoord::new(10, 8))),
        (9, ScriptStep::EnterOrderTarget),
        (10, ScriptStep::ClickLeft),
        (11, ScriptStep::ClickRight),
        (14, ScriptStep::PlaceWindtrapAtCell(CellCoord::new(9, 2))),
        (20, ScriptStep::Keys(scroll)),
        (80, ScriptStep::Keys(ActionStates::default())),
        (100, ScriptStep::CenterOnCell(CellCoord::new(32, 32))),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SkirmishSummary {
    pub(crate) selected: usize,
    pub(crate) orders_issued: u32,
    pub(crate) builders_opened: u32,
    pub(crate) placements: u32,
    pub(crate) credits: i32,
    pub(crate) power_balance: i64,
    pub(crate) alive_entities: usize,
    pub(crate) camera: Vec2,
}

#[derive(Debug)]
pub(crate) struct Skirmish {
    battlefield: BattleField,
    entities: EntityRepository,
    human: Player,
    cpu: Player,
    sidebar: Sidebar,
    pointer: ScreenPoint,
    orders_issued: u32,
}

impl Skirmish {
    pub(crate) fn new(config: &SkirmishConfig) -> Result<Self, ConfigLoadError> {
        let map = config.map_dimensions()?;
        let battlefield = BattleField::new(&config.battlefield, map, HUMAN)?;
        let human = Player::with_starting_credits(
            HUMAN,
            "atreides",
            FactionColor::Blue,
            config.starting_credits,
        );
        let cpu =
            Player::with_starting_credits(CPU, "CPU", FactionColor::Red, config.starting_credits);

        let mut skirmish = Self {
            battlefield,
            entities: EntityRepository::default(),
            human,
            cpu,
            sidebar: Sidebar::default(),
            pointer: ScreenPoint::default(),
            orders_issued: 0,
        };
        skirmish.spawn_starting_forces();
        info!(
            human = %skirmish.human,
            cpu = %skirmish.cpu,
            cpu_controlled = skirmish.cpu.is_cpu(),
            entities = skirmish.entities.entity_count(),
            "skirmish_ready"
        );
        Ok(skirmish)
    }

    fn spawn_starting_forces(&mut self) {
        let human_base = [
            (construction_yard(), CellCoord::new(1, 1)),
            (windtrap(), CellCoord::new(4, 1)),
            (trike(), CellCoord::new(3, 5)),
            (trike(), CellCoord::new(4, 5)),
            (trike(), CellCoord::new(6, 6)),
        ];
        for (data, cell) in human_base {
            self.entities.spawn_for(&mut self.human, data, cell.top_left());
            self.reveal_around(cell);
        }

        let map = self.battlefield.map();
        let far_x = (map.width_cells as i32 - 4).max(0);
        let far_y = (map.height_cells as i32 - 4).max(0);
        self.entities.spawn_for(
            &mut self.cpu,
            construction_yard(),
            CellCoord::new(far_x, far_y).top_left(),
        );
        self.entities.spawn_for(
            &mut self.cpu,
            trike(),
            CellCoord::new((far_x - 2).max(0), far_y).top_left(),
        );
    }

    fn reveal_around(&mut self, center: CellCoord) {
        let map = self.battlefield.map();
        for dy in -REVEAL_RADIUS_CELLS..=REVEAL_RADIUS_CELLS {
            for dx in -REVEAL_RADIUS_CELLS..=REVEAL_RADIUS_CELLS {
                let cell = CellCoord::new(center.x + dx, center.y + dy);
                if map.contains(cell) {
                    self.human.reveal(cell);
                }
            }
        }
    }

    pub(crate) fn set_focus(&mut self, has_focus: bool) {
        self.battlefield.set_focus(has_focus);
    }

    /// Screen point over `offset` pixels into `cell` at the current camera offset.
    fn screen_point_in_cell(&self, cell: CellCoord, offset: (i32, i32)) -> ScreenPoint {
        let widget = self.battlefield.widget();
        let origin = self.battlefield.translator().cell_to_viewport(cell);
        ScreenPoint::new(
            widget.x + origin.x + offset.0,
            widget.y + origin.y + offset.1,
        )
    }

    fn screen_point_at_cell_center(&self, cell: CellCoord) -> ScreenPoint {
        let half = CELL_SIZE_PX / 2;
        self.screen_point_in_cell(cell, (half, half))
    }

    pub(crate) fn apply(&mut self, step: ScriptStep) {
        debug!(?step, "script_step");
        match step {
            ScriptStep::Keys(actions) => self.battlefield.apply_actions(&actions),
            ScriptStep::HoverCell(cell) => {
                self.pointer = self.screen_point_at_cell_center(cell);
                self.battlefield.moved_to(self.pointer);
            }
            ScriptStep::DragToCell(cell) => {
                self.pointer = self.screen_point_at_cell_center(cell);
                self.battlefield.dragged_to_coordinates(self.pointer);
            }
            ScriptStep::ReleaseLeft => self.battlefield.left_button_released(self.pointer),
            ScriptStep::ClickLeft => self.battlefield.left_clicked(self.pointer),
            ScriptStep::ClickRight => self.battlefield.right_clicked(self.pointer),
            ScriptStep::EnterOrderTarget => {
                let hover = self.battlefield.hover_cell();
                let installed = self
                    .battlefield
                    .request_mouse_behavior(Box::new(OrderTargetMouse::new(hover)));
                debug!(installed, "order_target_requested");
            }
            ScriptStep::PlaceWindtrapAtCell(cell) => self.place_windtrap(cell),
            ScriptStep::CenterOnCell(cell) => self.battlefield.center_viewport_on_cell(cell),
        }
        self.handle_battlefield_events();
    }

    fn handle_battlefield_events(&mut self) {
        for event in self.battlefield.drain_events() {
            match event {
                BattlefieldEvent::DeselectAll => {
                    let deselected = self.entities.deselect_all();
                    self.battlefield.entities_deselected(&deselected);
                }
                BattlefieldEvent::SelectAt(cell) => {
                    let selected = self.entities.select_at_cell(cell, HUMAN);
                    self.announce_selection(&selected);
                }
                BattlefieldEvent::SelectWithin(rect) => {
                    let selected = self.entities.select_within(rect, HUMAN);
                    self.announce_selection(&selected);
                }
                BattlefieldEvent::OrderIssued(cell) => {
                    self.orders_issued += 1;
                    info!(
                        cell_x = cell.x,
                        cell_y = cell.y,
                        units = self.entities.selected().count(),
                        "order_issued"
                    );
                }
            }
        }
    }

    fn announce_selection(&mut self, ids: &[EntityId]) {
        let entities = self.entities.resolve(ids);
        self.battlefield.entities_selected(&entities, &mut self.sidebar);
    }

    fn place_windtrap(&mut self, cell: CellCoord) {
        let data = windtrap();
        let footprint: Footprint = data.footprint;
        let half = footprint.half_dimensions_px();
        self.pointer = self.screen_point_in_cell(cell, (half.x as i32, half.y as i32));
        self.battlefield.moved_to(self.pointer);

        let Some(top_left) = self
            .battlefield
            .top_left_cell_for_placement(footprint, self.pointer)
        else {
            debug!("placement_outside_battlefield");
            return;
        };
        if !self.battlefield.map().contains(top_left) {
            debug!(cell_x = top_left.x, cell_y = top_left.y, "placement_off_map");
            return;
        }
        if !self.human.spend(WINDTRAP_COST) {
            info!(
                credits = self.human.credits(),
                cost = WINDTRAP_COST,
                "placement_unaffordable"
            );
            return;
        }

        let id = self
            .entities
            .spawn_for(&mut self.human, data, top_left.top_left());
        self.reveal_around(top_left);
        if let Some(entity) = self.entities.entity(id) {
            self.battlefield.entity_placed_on_map(entity, &mut self.sidebar);
        }
    }

    pub(crate) fn tick(&mut self, delta_seconds: f32) {
        self.battlefield.update(delta_seconds, &self.entities);
        self.human.add_credits(HARVEST_CREDITS_PER_SECOND * delta_seconds);
        self.human.tick(delta_seconds);
        self.cpu.tick(delta_seconds);
    }

    pub(crate) fn render(&self, surface: &mut dyn DrawSurface) {
        self.battlefield.render(surface, &self.human);
    }

    pub(crate) fn summary(&self) -> SkirmishSummary {
        SkirmishSummary {
            selected: self.entities.selected().count(),
            orders_issued: self.orders_issued,
            builders_opened: self.sidebar.builders_opened,
            placements: self.sidebar.placements,
            credits: self.human.credits(),
            power_balance: self.human.power_balance(),
            alive_entities: self.human.alive_entity_count(&self.entities),
            camera: self.battlefield.viewing_vector(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skirmish() -> Skirmish {
        Skirmish::new(&SkirmishConfig::default()).expect("skirmish")
    }

    #[test]
    fn click_on_own_unit_opens_its_builder() {
        let mut skirmish = skirmish();
        skirmish.apply(ScriptStep::HoverCell(CellCoord::new(3, 5)));
        skirmish.apply(ScriptStep::ClickLeft);
        assert_eq!(skirmish.entities.selected().count(), 1);
        assert_eq!(skirmish.sidebar.builders_opened, 1);
        assert!(skirmish.sidebar.builder_open_for.is_some());
    }

    #[test]
    fn box_select_picks_group_and_closes_builders() {
        let mut skirmish = skirmish();
        skirmish.apply(ScriptStep::HoverCell(CellCoord::new(3, 5)));
        skirmish.apply(ScriptStep::ClickLeft);

        skirmish.apply(ScriptStep::DragToCell(CellCoord::new(2, 4)));
        skirmish.apply(ScriptStep::DragToCell(CellCoord::new(7, 7)));
        skirmish.apply(ScriptStep::ReleaseLeft);

        let names: Vec<&str> = skirmish
            .entities
            .selected()
            .map(|entity| entity.data.name.as_str())
            .collect();
        assert_eq!(names, vec!["trike", "trike", "trike"]);
        assert_eq!(skirmish.sidebar.builder_open_for, None);
    }

    #[test]
    fn order_target_issues_order_then_cancels() {
        let mut skirmish = skirmish();
        skirmish.apply(ScriptStep::HoverCell(CellCoord::new(10, 8)));
        skirmish.apply(ScriptStep::EnterOrderTarget);
        skirmish.apply(ScriptStep::ClickLeft);
        assert_eq!(skirmish.orders_issued, 1);

        skirmish.apply(ScriptStep::ClickRight);
        skirmish.apply(ScriptStep::ClickLeft);
        assert_eq!(skirmish.orders_issued, 1);
    }

    #[test]
    fn placing_windtrap_spends_credits_and_adds_power() {
        let mut skirmish = skirmish();
        let before = skirmish.human.power_balance();
        skirmish.apply(ScriptStep::PlaceWindtrapAtCell(CellCoord::new(9, 2)));

        let summary = skirmish.summary();
        assert_eq!(summary.placements, 1);
        assert_eq!(summary.credits, 1700);
        assert_eq!(summary.power_balance, before + 100);
        let placed = skirmish
            .entities
            .find_at_cell(CellCoord::new(10, 3))
            .expect("windtrap covers its footprint");
        assert_eq!(placed.cell(), CellCoord::new(9, 2));
        assert!(skirmish.human.is_visible(CellCoord::new(12, 5)));
    }

    #[test]
    fn placement_without_credits_is_refused() {
        let config = SkirmishConfig {
            starting_credits: 100,
            ..SkirmishConfig::default()
        };
        let mut skirmish = Skirmish::new(&config).expect("skirmish");
        skirmish.apply(ScriptStep::PlaceWindtrapAtCell(CellCoord::new(9, 2)));
        assert_eq!(skirmish.summary().placements, 0);
        assert_eq!(skirmish.human.credits(), 100);
    }

    #[test]
    fn enemy_units_are_never_selected() {
        let mut skirmish = skirmish();
        skirmish.apply(ScriptStep::CenterOnCell(CellCoord::new(60, 60)));
        skirmish.apply(ScriptStep::HoverCell(CellCoord::new(60, 60)));
        skirmish.apply(ScriptStep::ClickLeft);
        assert_eq!(skirmish.entities.selected().count(), 0);
        assert_eq!(skirmish.sidebar.builders_opened, 0);
    }
}

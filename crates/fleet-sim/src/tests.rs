//! Integration tests for fleet-sim.

use fleet_core::{OrderStatus, RobotStatus, Tick};
use fleet_dispatch::{DispatchError, FleetStore, Order, Robot, Route};
use fleet_events::EventKind;
use fleet_graph::{DijkstraRouter, Edge, Graph, GraphError, shortest_path};

use crate::{
    Fleet, FleetBuilder, FleetConfig, NoopObserver, RobotPosition, Scenario, SimError,
    TickObserver, TickSummary,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn warehouse_graph() -> Graph {
    let seed = Scenario::warehouse().graph;
    Graph::from_parts(seed.nodes, seed.edges).unwrap()
}

fn warehouse_fleet() -> Fleet<DijkstraRouter> {
    Scenario::warehouse().build(DijkstraRouter).unwrap()
}

/// R1@A and R3@E idle, no orders.
fn two_idle_robots() -> Fleet<DijkstraRouter> {
    FleetBuilder::new(warehouse_graph(), DijkstraRouter)
        .robot(Robot::idle("R1", "A"))
        .robot(Robot::idle("R3", "E"))
        .build()
        .unwrap()
}

fn kinds(fleet: &Fleet<DijkstraRouter>) -> Vec<EventKind> {
    fleet.event_log().iter().map(|e| e.kind).collect()
}

fn order_status(fleet: &Fleet<DijkstraRouter>, name: &str) -> OrderStatus {
    fleet.store().order(name).unwrap().status
}

fn robot<'a>(fleet: &'a Fleet<DijkstraRouter>, name: &str) -> &'a Robot {
    fleet.store().robot(name).unwrap()
}

// ── Seed scenario ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod seed {
    use super::*;

    #[test]
    fn warehouse_assigns_seed_order_to_r1() {
        let fleet = warehouse_fleet();
        assert_eq!(fleet.graph().node_count(), 6);
        assert_eq!(fleet.graph().edge_count(), 6);
        assert_eq!(fleet.robots().len(), 3);

        assert_eq!(order_status(&fleet, "O-1001"), OrderStatus::InProgress);
        assert_eq!(robot(&fleet, "R1").status, RobotStatus::Executing);
        assert_eq!(robot(&fleet, "R2").status, RobotStatus::Executing);
        assert_eq!(robot(&fleet, "R3").status, RobotStatus::Idle);

        let route = fleet.store().route_for_order("O-1001").unwrap();
        assert_eq!(route.robot, "R1");
        assert_eq!(route.path, ["A", "B", "C", "D"]);
        assert_eq!(kinds(&fleet), [EventKind::OrderCreated, EventKind::OrderAssigned]);
    }

    #[test]
    fn assigned_event_carries_path_and_cost() {
        let fleet = warehouse_fleet();
        let ev = fleet.event_log().last().unwrap();
        assert_eq!(ev.kind, EventKind::OrderAssigned);
        assert_eq!(ev.detail_str("robot"), Some("R1"));
        assert_eq!(ev.detail["path"], serde_json::json!(["A", "B", "C", "D"]));
        assert_eq!(ev.detail["cost"].as_f64(), Some(5.0));
    }

    #[test]
    fn seed_order_completes_after_five_ticks() {
        let mut fleet = warehouse_fleet();
        for _ in 0..4 {
            fleet.advance();
            assert_eq!(order_status(&fleet, "O-1001"), OrderStatus::InProgress);
        }
        let summary = fleet.advance();
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.tick, Tick(4));
        assert_eq!(order_status(&fleet, "O-1001"), OrderStatus::Done);
        assert_eq!(robot(&fleet, "R1").status, RobotStatus::Idle);
        assert_eq!(robot(&fleet, "R1").node, "D");
        assert!(fleet.routes().is_empty());
        assert_eq!(fleet.current_tick(), Tick(5));
    }

    #[test]
    fn executing_seed_robot_stays_busy() {
        let mut fleet = warehouse_fleet();
        fleet.run_ticks(10, &mut NoopObserver);
        assert_eq!(robot(&fleet, "R2").status, RobotStatus::Executing);
        assert_eq!(robot(&fleet, "R2").node, "C");

        fleet.release_robot("R2").unwrap();
        assert_eq!(robot(&fleet, "R2").status, RobotStatus::Idle);
    }
}

// ── create_order ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod create_order {
    use super::*;

    #[test]
    fn unknown_node_rejected_before_name_check() {
        let mut fleet = warehouse_fleet();
        let err = fleet.create_order("O-1001", "Z", "A").unwrap_err();
        assert!(matches!(err, SimError::Graph(GraphError::InvalidNode(n)) if n == "Z"));
        let err = fleet.create_order("O-2", "A", "Z").unwrap_err();
        assert!(matches!(err, SimError::Graph(GraphError::InvalidNode(_))));
        assert_eq!(fleet.orders().len(), 1);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut fleet = warehouse_fleet();
        let before = fleet.event_log().len();
        let err = fleet.create_order("O-1001", "A", "F").unwrap_err();
        assert!(matches!(err, SimError::Dispatch(DispatchError::DuplicateOrderName(_))));
        assert_eq!(fleet.orders().len(), 1);
        assert_eq!(fleet.event_log().len(), before);
    }

    #[test]
    fn unreachable_target_rejected() {
        let graph = Graph::from_parts(["A", "B", "island"], vec![Edge::new("A", "B", 1.0)]).unwrap();
        let mut fleet = FleetBuilder::new(graph, DijkstraRouter)
            .robot(Robot::idle("R1", "A"))
            .build()
            .unwrap();
        let err = fleet.create_order("O-1", "A", "island").unwrap_err();
        assert!(matches!(err, SimError::Graph(GraphError::NoPathFound { .. })));
        assert!(fleet.orders().is_empty());
        assert!(fleet.event_log().is_empty());
    }

    #[test]
    fn no_idle_robot_leaves_order_new() {
        let mut fleet = warehouse_fleet();
        fleet.create_order("O-2", "A", "B").unwrap(); // R3
        let order = fleet.create_order("O-3", "C", "D").unwrap();
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.created_tick, Tick(0));
        assert!(fleet.store().route_for_order("O-3").is_none());
        assert_eq!(fleet.event_log().last().unwrap().kind, EventKind::OrderCreated);
    }

    #[test]
    fn returned_order_reflects_assignment() {
        let mut fleet = two_idle_robots();
        let order = fleet.create_order("O-1", "F", "A").unwrap();
        assert_eq!(order.status, OrderStatus::InProgress);
        assert_eq!(fleet.store().route_for_order("O-1").unwrap().robot, "R3");
    }
}

// ── Tick engine ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick {
    use super::*;

    #[test]
    fn idle_tick_emits_only_tick_processed() {
        let mut fleet = two_idle_robots();
        let summary = fleet.advance();
        assert_eq!(kinds(&fleet), [EventKind::TickProcessed]);
        assert_eq!(summary, TickSummary { tick: Tick(0), ..TickSummary::default() });

        let ev = fleet.event_log().last().unwrap();
        assert_eq!(ev.detail["tick"], 0);
        assert_eq!(ev.detail["active_routes"], 0);
    }

    #[test]
    fn first_tick_of_seed_route() {
        let mut fleet = warehouse_fleet();
        fleet.advance();
        let tail: Vec<_> = kinds(&fleet).into_iter().skip(2).collect();
        assert_eq!(
            tail,
            [EventKind::RobotMoving, EventKind::RobotArrived, EventKind::TickProcessed]
        );
        assert_eq!(robot(&fleet, "R1").node, "B");
        let route = &fleet.routes()[0];
        assert_eq!(route.next_index, 1);
        assert_eq!(route.remaining_weight, 0.0);
    }

    #[test]
    fn remaining_weight_resets_per_edge() {
        let mut fleet = warehouse_fleet();
        fleet.run_ticks(5, &mut NoopObserver);

        let moves: Vec<(String, String, f64)> = fleet
            .event_log()
            .iter()
            .filter(|e| e.kind == EventKind::RobotMoving)
            .map(|e| {
                (
                    e.detail_str("from").unwrap().to_owned(),
                    e.detail_str("to").unwrap().to_owned(),
                    e.detail["remaining_weight"].as_f64().unwrap(),
                )
            })
            .collect();
        let expected = [("A", "B", 0.0), ("B", "C", 1.0), ("B", "C", 0.0), ("C", "D", 1.0), ("C", "D", 0.0)];
        assert_eq!(moves.len(), expected.len());
        for ((f, t, w), (ef, et, ew)) in moves.iter().zip(expected) {
            assert_eq!((f.as_str(), t.as_str(), *w), (ef, et, ew));
        }
    }

    #[test]
    fn route_completes_within_total_weight() {
        for target in ["A", "B", "C", "D", "E", "F"] {
            let mut fleet = FleetBuilder::new(warehouse_graph(), DijkstraRouter)
                .robot(Robot::idle("R1", "A"))
                .build()
                .unwrap();
            fleet.create_order("O", "A", target).unwrap();
            let weight = shortest_path(fleet.graph(), "A", target).unwrap().cost;

            let mut ticks = 0u32;
            while order_status(&fleet, "O") != OrderStatus::Done {
                fleet.advance();
                ticks += 1;
                for r in fleet.routes() {
                    assert!(r.remaining_weight >= 0.0);
                }
                assert!(ticks <= 100, "route to {target} never completed");
            }
            assert_eq!(f64::from(ticks), weight.max(1.0), "target {target}");
            assert_eq!(robot(&fleet, "R1").node, target);
        }
    }

    #[test]
    fn single_node_route_completes_first_tick() {
        let mut fleet = two_idle_robots();
        fleet.create_order("O-1", "A", "A").unwrap();
        assert_eq!(fleet.routes()[0].path, ["A"]);
        let summary = fleet.advance();
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.moved, 0);
        assert_eq!(order_status(&fleet, "O-1"), OrderStatus::Done);
        assert_eq!(fleet.event_log().count(EventKind::RobotMoving), 0);
    }

    #[test]
    fn queued_order_goes_to_first_free_robot() {
        let mut fleet = warehouse_fleet();
        fleet.create_order("O-2", "A", "B").unwrap(); // R3: E B A B
        fleet.create_order("O-3", "C", "D").unwrap(); // nobody free
        assert_eq!(order_status(&fleet, "O-3"), OrderStatus::New);

        for _ in 0..4 {
            assert_eq!(fleet.advance().assigned, 0);
        }
        // R1 finishes at D and R3 at B on the same tick; both are 2 from C.
        let summary = fleet.advance();
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.assigned, 1);
        assert_eq!(summary.active_routes, 1);
        assert_eq!(order_status(&fleet, "O-3"), OrderStatus::InProgress);
        assert_eq!(fleet.store().route_for_order("O-3").unwrap().robot, "R1");
    }

    #[test]
    fn missing_edge_uses_fallback_weight() {
        let mut fleet = two_idle_robots();
        fleet.store.add_order(Order::new("O-x", "A", "D")).unwrap();
        fleet.store.order_mut("O-x").unwrap().status = OrderStatus::InProgress;
        fleet.store.robot_mut("R1").unwrap().status = RobotStatus::Executing;
        // A and D are not adjacent.
        fleet
            .store
            .insert_route(Route::new("R1".into(), "O-x".into(), vec!["A".into(), "D".into()]))
            .unwrap();

        let summary = fleet.advance();
        assert_eq!(summary.moved, 1);
        assert_eq!(summary.completed, 1);
        assert_eq!(robot(&fleet, "R1").node, "D");
        assert_eq!(order_status(&fleet, "O-x"), OrderStatus::Done);
    }

    #[test]
    fn broken_route_is_isolated() {
        let mut fleet = two_idle_robots();
        fleet.create_order("O-1", "B", "D").unwrap(); // R1
        fleet.store.robot_mut("R3").unwrap().status = RobotStatus::Executing;
        fleet
            .store
            .insert_route(Route::new("R3".into(), "missing".into(), vec!["E".into(), "F".into()]))
            .unwrap();
        fleet
            .store
            .insert_route(Route::new("ghost".into(), "O-1".into(), vec!["A".into(), "B".into()]))
            .unwrap();

        let summary = fleet.advance();
        assert_eq!(summary.discarded, 2);
        assert_eq!(summary.arrived, 1);
        assert_eq!(fleet.routes().len(), 1);
        assert_eq!(fleet.routes()[0].robot, "R1");
        assert_eq!(robot(&fleet, "R1").node, "B");
        // Released, not moved.
        assert_eq!(robot(&fleet, "R3").status, RobotStatus::Idle);
        assert_eq!(robot(&fleet, "R3").node, "E");
        assert_eq!(fleet.event_log().last().unwrap().kind, EventKind::TickProcessed);
    }

    #[test]
    fn order_of_discarded_route_is_redispatched() {
        let mut fleet = two_idle_robots();
        fleet.store.add_order(Order::new("O-x", "B", "C")).unwrap();
        fleet.store.order_mut("O-x").unwrap().status = OrderStatus::InProgress;
        fleet
            .store
            .insert_route(Route::new("ghost".into(), "O-x".into(), vec!["A".into(), "B".into()]))
            .unwrap();

        let summary = fleet.advance();
        assert_eq!(summary.discarded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.assigned, 1);
        assert_eq!(order_status(&fleet, "O-x"), OrderStatus::InProgress);
        assert_eq!(fleet.store().route_for_order("O-x").unwrap().robot, "R1");

        let failed = fleet
            .event_log()
            .iter()
            .find(|e| e.kind == EventKind::OrderFailed)
            .unwrap();
        assert_eq!(failed.detail_str("order"), Some("O-x"));
        assert_eq!(failed.detail_str("reason"), Some("route_discarded"));

        fleet.run_ticks(10, &mut NoopObserver);
        assert_eq!(order_status(&fleet, "O-x"), OrderStatus::Done);
    }

    #[test]
    fn discarded_route_keeps_order_with_live_route() {
        let mut fleet = two_idle_robots();
        fleet.create_order("O-1", "B", "D").unwrap(); // R1
        fleet
            .store
            .insert_route(Route::new("ghost".into(), "O-1".into(), vec!["A".into(), "B".into()]))
            .unwrap();

        let summary = fleet.advance();
        assert_eq!(summary.discarded, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(order_status(&fleet, "O-1"), OrderStatus::InProgress);
        assert_eq!(fleet.event_log().count(EventKind::OrderFailed), 0);
    }

    /// R1@A on a three-node line with the given leg weights, ordered A→C.
    fn line_fleet(ab: f64, bc: f64) -> Fleet<DijkstraRouter> {
        let graph = Graph::from_parts(
            ["A", "B", "C"],
            vec![Edge::new("A", "B", ab), Edge::new("B", "C", bc)],
        )
        .unwrap();
        let mut fleet = FleetBuilder::new(graph, DijkstraRouter)
            .robot(Robot::idle("R1", "A"))
            .build()
            .unwrap();
        fleet.create_order("O", "A", "C").unwrap();
        assert_eq!(fleet.routes()[0].path, ["A", "B", "C"]);
        fleet
    }

    fn ticks_to_done(fleet: &mut Fleet<DijkstraRouter>) -> u32 {
        let mut ticks = 0;
        while order_status(fleet, "O") != OrderStatus::Done {
            fleet.advance();
            ticks += 1;
            for r in fleet.routes() {
                assert!(r.remaining_weight >= 0.0);
            }
            assert!(ticks <= 100, "route never completed");
        }
        ticks
    }

    #[test]
    fn fractional_edges_take_one_tick_each() {
        let mut fleet = line_fleet(0.5, 0.5);
        assert_eq!(ticks_to_done(&mut fleet), 2);

        let remaining: Vec<f64> = fleet
            .event_log()
            .iter()
            .filter(|e| e.kind == EventKind::RobotMoving)
            .map(|e| e.detail["remaining_weight"].as_f64().unwrap())
            .collect();
        assert_eq!(remaining, [0.0, 0.0]);
        assert_eq!(robot(&fleet, "R1").node, "C");
    }

    #[test]
    fn fractional_edge_rounds_up() {
        let mut fleet = line_fleet(1.5, 1.0);
        assert_eq!(ticks_to_done(&mut fleet), 3);
    }

    #[test]
    fn zero_weight_edges_cross_without_moving() {
        let mut fleet = line_fleet(0.0, 0.0);
        assert_eq!(ticks_to_done(&mut fleet), 2);
        assert_eq!(fleet.event_log().count(EventKind::RobotMoving), 0);
        assert_eq!(fleet.event_log().count(EventKind::RobotArrived), 2);
        assert_eq!(robot(&fleet, "R1").node, "C");
    }
}

// ── Order expiry ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod expiry {
    use super::*;

    fn busy_fleet(timeout: Option<u64>) -> Fleet<DijkstraRouter> {
        let config = FleetConfig { order_timeout_ticks: timeout, ..FleetConfig::default() };
        FleetBuilder::new(warehouse_graph(), DijkstraRouter)
            .config(config)
            .robot(Robot::idle("R1", "A").with_status(RobotStatus::Executing))
            .build()
            .unwrap()
    }

    #[test]
    fn waiting_order_fails_after_timeout() {
        let mut fleet = busy_fleet(Some(2));
        fleet.create_order("O-1", "B", "C").unwrap();

        assert_eq!(fleet.advance().failed, 0);
        assert_eq!(fleet.advance().failed, 0);
        assert_eq!(order_status(&fleet, "O-1"), OrderStatus::New);

        let summary = fleet.advance();
        assert_eq!(summary.failed, 1);
        assert_eq!(order_status(&fleet, "O-1"), OrderStatus::Failed);

        let failed = fleet
            .event_log()
            .iter()
            .find(|e| e.kind == EventKind::OrderFailed)
            .unwrap();
        assert_eq!(failed.detail_str("order"), Some("O-1"));
        assert_eq!(failed.detail["waited_ticks"], 2);

        // Already FAILED orders are not failed again.
        assert_eq!(fleet.advance().failed, 0);
        assert_eq!(fleet.event_log().count(EventKind::OrderFailed), 1);
    }

    #[test]
    fn failed_order_is_still_dispatched() {
        let mut fleet = busy_fleet(Some(1));
        fleet.create_order("O-1", "B", "C").unwrap();
        fleet.advance();
        fleet.advance();
        assert_eq!(order_status(&fleet, "O-1"), OrderStatus::Failed);

        fleet.release_robot("R1").unwrap();
        assert_eq!(fleet.advance().assigned, 1);
        assert_eq!(order_status(&fleet, "O-1"), OrderStatus::InProgress);
    }

    #[test]
    fn no_timeout_never_fails() {
        let mut fleet = busy_fleet(None);
        fleet.create_order("O-1", "B", "C").unwrap();
        fleet.run_ticks(50, &mut NoopObserver);
        assert_eq!(order_status(&fleet, "O-1"), OrderStatus::New);
    }

    #[test]
    fn zero_timeout_is_a_config_error() {
        let result = FleetBuilder::new(warehouse_graph(), DijkstraRouter)
            .config(FleetConfig::default().with_order_timeout(0))
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }
}

// ── Views ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod views {
    use super::*;

    #[test]
    fn positions_interpolate_current_edge() {
        let mut fleet = warehouse_fleet();
        fleet.advance();
        fleet.advance();

        let positions = fleet.robot_positions();
        assert_eq!(positions.len(), 3);

        let r1 = &positions[0];
        assert_eq!((r1.from.as_str(), r1.to.as_str()), ("B", "C"));
        assert_eq!(r1.progress, 0.5);
        assert_eq!(r1.status, RobotStatus::Executing);

        let r2 = &positions[1];
        assert!(r2.is_stationary());
        assert_eq!(r2.from, "C");
        assert_eq!(r2.progress, 1.0);
    }

    #[test]
    fn arrived_robot_is_stationary() {
        let mut fleet = warehouse_fleet();
        fleet.advance();
        let r1 = &fleet.robot_positions()[0];
        assert_eq!(*r1, RobotPosition::stationary(robot(&fleet, "R1")));
        assert_eq!(r1.from, "B");
    }

    #[test]
    fn event_query_through_facade() {
        let mut fleet = warehouse_fleet();
        fleet.run_ticks(3, &mut NoopObserver);

        let latest = fleet.events(None, Some(2)).unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].kind, EventKind::TickProcessed);
        assert!(latest[0].time >= latest[1].time);

        let all = fleet.events(None, None).unwrap();
        assert_eq!(all.len(), fleet.event_log().len());
        assert_eq!(all.last().unwrap().kind, EventKind::OrderCreated);

        let pivot = all[all.len() / 2].time;
        assert!(fleet.events_since(Some(pivot), None).iter().all(|e| e.time > pivot));

        assert!(matches!(fleet.events(Some("not a time"), None), Err(SimError::Events(_))));
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        starts:    Vec<Tick>,
        summaries: Vec<TickSummary>,
        snapshots: Vec<(Tick, usize, usize)>,
        end:       Option<Tick>,
    }

    impl TickObserver for Recorder {
        fn on_tick_start(&mut self, tick: Tick) {
            self.starts.push(tick);
        }
        fn on_tick_end(&mut self, summary: &TickSummary) {
            self.summaries.push(*summary);
        }
        fn on_snapshot(&mut self, tick: Tick, store: &FleetStore, positions: &[RobotPosition]) {
            self.snapshots.push((tick, store.robots().len(), positions.len()));
        }
        fn on_run_end(&mut self, final_tick: Tick) {
            self.end = Some(final_tick);
        }
    }

    #[test]
    fn hooks_fire_in_order() {
        let mut fleet = warehouse_fleet();
        fleet.config.snapshot_interval_ticks = 2;
        let mut rec = Recorder::default();
        fleet.run_ticks(5, &mut rec);

        assert_eq!(rec.starts, (0..5).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.summaries.len(), 5);
        assert_eq!(rec.summaries.iter().map(|s| s.completed).sum::<usize>(), 1);
        assert_eq!(
            rec.snapshots,
            [(Tick(0), 3, 3), (Tick(2), 3, 3), (Tick(4), 3, 3)]
        );
        assert_eq!(rec.end, Some(Tick(5)));
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let mut fleet = warehouse_fleet();
        fleet.config.snapshot_interval_ticks = 0;
        let mut rec = Recorder::default();
        fleet.run_ticks(3, &mut rec);
        assert!(rec.snapshots.is_empty());
        assert_eq!(rec.summaries.len(), 3);
    }
}

// ── Scenario loading ──────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario {
    use std::io::Write;

    use super::*;

    const LOOP: &str = r#"
        [config]
        order_timeout_ticks = 5

        [graph]
        nodes = ["P1", "P2", "P3"]
        edges = [
            { from = "P1", to = "P2", weight = 2.0 },
            { from = "P2", to = "P3" },
        ]

        [[robots]]
        name = "AGV-2"
        node = "P3"

        [[robots]]
        name = "AGV-1"
        node = "P1"
        status = "EXECUTING"

        [[orders]]
        name = "O-1"
        source = "P2"
        target = "P1"
    "#;

    #[test]
    fn parses_and_builds_toml() {
        let scenario = Scenario::from_toml_str(LOOP).unwrap();
        assert_eq!(scenario.config.order_timeout_ticks, Some(5));
        assert_eq!(scenario.config.snapshot_interval_ticks, 1);
        assert_eq!(scenario.graph.edges[1].weight, 1.0);
        assert_eq!(scenario.robots[0].status, RobotStatus::Idle);
        assert_eq!(scenario.robots[1].status, RobotStatus::Executing);

        let fleet = scenario.build(DijkstraRouter).unwrap();
        let route = fleet.store().route_for_order("O-1").unwrap();
        assert_eq!(route.robot, "AGV-2");
        assert_eq!(route.path, ["P3", "P2", "P1"]);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = Scenario::from_toml_str("[graph]\nnodes = []\nspeed = 3\n").unwrap_err();
        assert!(matches!(err, SimError::Toml(_)));
    }

    #[test]
    fn robot_on_unknown_node_fails_build() {
        let mut scenario = Scenario::warehouse();
        scenario.robots[0].node = "Q".into();
        let err = scenario.build(DijkstraRouter).unwrap_err();
        assert!(matches!(err, SimError::Graph(GraphError::InvalidNode(n)) if n == "Q"));
    }

    #[test]
    fn duplicate_robot_fails_build() {
        let mut scenario = Scenario::warehouse();
        scenario.robots[2].name = "R1".into();
        let err = scenario.build(DijkstraRouter).unwrap_err();
        assert!(matches!(err, SimError::Dispatch(DispatchError::DuplicateRobotName(_))));
    }

    #[test]
    fn negative_weight_fails_build() {
        let mut scenario = Scenario::warehouse();
        scenario.graph.edges[0].weight = -1.0;
        let err = scenario.build(DijkstraRouter).unwrap_err();
        assert!(matches!(err, SimError::Graph(GraphError::InvalidWeight { .. })));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LOOP.as_bytes()).unwrap();
        let scenario = Scenario::from_file(file.path()).unwrap();
        assert_eq!(scenario.orders.len(), 1);

        let missing = Scenario::from_file(file.path().with_extension("absent"));
        assert!(matches!(missing, Err(SimError::Io(_))));
    }
}

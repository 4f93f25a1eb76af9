//! # Frame Cycle Tests
//!
//! Drives compiled markup through the headless platform: input, frame hooks,
//! paint gating, reload and shutdown.

use std::sync::Mutex;
use std::time::Duration;

use overlay_core::Rect;
use overlay_ui::{
    compile_files, compile_str, BehaviorRegistry, CommandRecorder, Driver, FrameClock,
    HeadlessPlatform, HookEvent, MarkupSource, MouseButton, Node, NodeId, NodeState, PointerEvent,
    PointerKind, RenderCommand, Scene, Shutdown, UiError, WindowEvent,
};

const STYLE: &str = r#"
<Styles>
    <Class Name="Root">
        <Size Width="100" Height="100"/>
        <Offset Left="0" Top="0"/>
        <Background Colour="0xFF202020" Border="0xFFFFFFFF"/>
    </Class>
    <Class Name="Child">
        <Size Width="50" Height="50"/>
        <Offset Left="25" Top="25"/>
        <Background Colour="0xFF0000FF"/>
    </Class>
</Styles>"#;

const BLUEPRINT: &str = r#"
<Node Class="Root">
    <Node Class="Child" onState="NoLeftClick"/>
</Node>"#;

fn no_left_click(_: &mut Node, event: HookEvent<'_>) -> bool {
    if let HookEvent::State(state) = event {
        state.left_clicked = false;
    }
    false
}

fn quiet(_: &mut Node, _: HookEvent<'_>) -> bool {
    false
}

fn registry() -> BehaviorRegistry {
    let mut registry = BehaviorRegistry::new();
    registry.register("NoLeftClick", no_left_click).register("Quiet", quiet);
    registry
}

fn driver(blueprint: &str) -> Driver {
    Driver::new(
        MarkupSource::Inline {
            blueprint: blueprint.into(),
            style: STYLE.into(),
        },
        registry(),
        Rect::new(0.0, 0.0, 200.0, 100.0),
        FrameClock::new(1000),
    )
    .unwrap()
}

fn send(driver: &mut Driver, x: i16, y: i16, kind: PointerKind) -> NodeState {
    let mut platform = HeadlessPlatform::new();
    platform.push(WindowEvent::Pointer(PointerEvent::new(x, y, kind)));
    driver.process_events(&mut platform);
    driver.scene().node(NodeId(1)).unwrap().state
}

/// Test: The reference two-node layout against a 200x100 box.
#[test]
fn test_root_and_child_rectangles() {
    let driver = driver(r#"<Node Class="Root"><Node Class="Child"/></Node>"#);
    let scene = driver.scene();

    assert_eq!(scene.nodes[0].area, Rect::new(0.0, 0.0, 200.0, 100.0));
    assert_eq!(scene.nodes[1].area, Rect::new(50.0, 25.0, 150.0, 75.0));
}

/// Test: Compiling the same markup twice gives identical scenes.
#[test]
fn test_reload_is_idempotent() {
    let bounds = Rect::new(0.0, 0.0, 640.0, 480.0);
    let mut first = Scene::new();
    let mut second = Scene::new();
    compile_str(bounds, BLUEPRINT, STYLE, &registry(), &mut first).unwrap();
    compile_str(bounds, BLUEPRINT, STYLE, &registry(), &mut second).unwrap();
    compile_str(bounds, BLUEPRINT, STYLE, &registry(), &mut second).unwrap();

    assert_eq!(first.nodes.len(), second.nodes.len());
    assert_eq!(first.classes.len(), second.classes.len());
    assert_eq!(first.callbacks.len(), second.callbacks.len());
    for (a, b) in first.nodes.iter().zip(second.nodes.iter()) {
        assert_eq!(a.area, b.area);
    }

    let mut driver = driver(BLUEPRINT);
    let before: Vec<Rect> = driver.scene().nodes.iter().map(|node| node.area).collect();
    driver.reload().unwrap();
    driver.reload().unwrap();
    let after: Vec<Rect> = driver.scene().nodes.iter().map(|node| node.area).collect();
    assert_eq!(before, after);
}

/// Test: Edges are part of the rectangle, one unit past them is not.
#[test]
fn test_hit_test_boundary() {
    let mut driver = driver(r#"<Node Class="Root"><Node Class="Child"/></Node>"#);

    assert!(send(&mut driver, 150, 75, PointerKind::Move).hovered);
    assert!(send(&mut driver, 50, 25, PointerKind::Move).hovered);
    assert!(!send(&mut driver, 151, 75, PointerKind::Move).hovered);
    assert!(!send(&mut driver, 50, 24, PointerKind::Move).hovered);
}

/// Test: Move in, press, move out, release.
#[test]
fn test_left_click_latch() {
    let mut driver = driver(r#"<Node Class="Root"><Node Class="Child"/></Node>"#);

    let state = send(&mut driver, 100, 50, PointerKind::Move);
    assert!(state.hovered && !state.left_clicked);

    let state = send(&mut driver, 100, 50, PointerKind::Down(MouseButton::Left));
    assert!(state.hovered && state.left_clicked);

    let state = send(&mut driver, 5, 5, PointerKind::Move);
    assert!(!state.hovered);
    assert!(state.left_clicked, "moving out must not release the latch");

    let state = send(&mut driver, 5, 5, PointerKind::Up(MouseButton::Right));
    assert!(state.left_clicked, "another button's release must not release the latch");

    let state = send(&mut driver, 5, 5, PointerKind::Up(MouseButton::Left));
    assert!(!state.left_clicked);
}

/// Test: A state hook can rewrite the proposed state before it is committed.
#[test]
fn test_state_hook_edits_are_committed() {
    let mut driver = driver(BLUEPRINT);

    let state = send(&mut driver, 100, 50, PointerKind::Down(MouseButton::Left));
    assert!(state.hovered);
    assert!(!state.left_clicked);

    let state = send(&mut driver, 100, 50, PointerKind::Down(MouseButton::Right));
    assert!(state.right_clicked);
}

/// Test: Hooks naming the same behavior share a slot.
#[test]
fn test_callback_dedup() {
    let driver = driver(
        r#"<Node Class="Root" onFrame="Quiet">
            <Node Class="Child" onState="Quiet"/>
            <Node onState="NoLeftClick"/>
            <Node><onState>Quiet</onState></Node>
        </Node>"#,
    );
    let nodes = &driver.scene().nodes;

    assert_eq!(nodes[0].on_frame, nodes[1].on_state);
    assert_eq!(nodes[1].on_state, nodes[3].on_state);
    assert_ne!(nodes[1].on_state, nodes[2].on_state);
    assert_eq!(driver.scene().callbacks.len(), 3);
}

/// Test: Capacity overruns are reported, never truncated.
#[test]
fn test_capacity_guards() {
    let mut scene = Scene::new();
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);

    let five = "<Node><Node/><Node/><Node/><Node/><Node/></Node>";
    assert!(matches!(
        compile_str(bounds, five, STYLE, &registry(), &mut scene),
        Err(UiError::TooManyChildren { node: 0, limit: 4 })
    ));

    let mut wide = String::from("<Node>");
    for _ in 0..4 {
        wide.push_str("<Node>");
        for _ in 0..4 {
            wide.push_str("<Node>");
            for _ in 0..4 {
                wide.push_str("<Node><Node/><Node/><Node/><Node/></Node>");
            }
            wide.push_str("</Node>");
        }
        wide.push_str("</Node>");
    }
    wide.push_str("</Node>");
    // 1 + 4 + 16 + 64 + 256 nodes.
    assert!(matches!(
        compile_str(bounds, &wide, STYLE, &registry(), &mut scene),
        Err(UiError::NodeCapacity(256))
    ));

    let mut classes = String::from("<Styles>");
    for i in 0..=256 {
        classes.push_str(&format!(r#"<Class Name="C{i}"/>"#));
    }
    classes.push_str("</Styles>");
    assert!(matches!(
        compile_str(bounds, "<Node/>", &classes, &registry(), &mut scene),
        Err(UiError::ClassCapacity(256))
    ));
}

/// Test: A runaway chain of nested nodes is rejected and the live scene survives.
#[test]
fn test_deep_nesting_is_an_error() {
    let depth = 50_000;
    let chain = format!("{}{}", "<Node>".repeat(depth), "</Node>".repeat(depth));

    let mut scene = Scene::new();
    let result = compile_str(Rect::new(0.0, 0.0, 100.0, 100.0), &chain, "", &BehaviorRegistry::new(), &mut scene);
    assert!(matches!(result, Err(UiError::TooDeep { .. })));

    let dir = std::env::temp_dir().join(format!("overlay-deep-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let blueprint = dir.join("Mainwindow.xml");
    let style = dir.join("Style.xml");
    std::fs::write(&blueprint, r#"<Node Class="Root"><Node Class="Child"/></Node>"#).unwrap();
    std::fs::write(&style, STYLE).unwrap();

    let mut driver = Driver::new(
        MarkupSource::Files {
            blueprint: blueprint.clone(),
            style,
        },
        registry(),
        Rect::new(0.0, 0.0, 200.0, 100.0),
        FrameClock::new(1000),
    )
    .unwrap();

    std::fs::write(&blueprint, &chain).unwrap();
    assert!(matches!(driver.reload(), Err(UiError::TooDeep { .. })));
    assert_eq!(driver.scene().nodes.len(), 2);
    assert_eq!(driver.scene().nodes[1].area, Rect::new(50.0, 25.0, 150.0, 75.0));

    let _ = std::fs::remove_dir_all(&dir);
}

/// Test: One frame paints fills and borders, then stays idle until dirtied.
#[test]
fn test_paint_gate() {
    let mut driver = driver(r#"<Node Class="Root"><Node Class="Child"/></Node>"#);
    let mut platform = HeadlessPlatform::new();
    let mut backend = CommandRecorder::new();

    assert_eq!(driver.frame(&mut platform, &mut backend), None);
    assert_eq!(backend.frames(), 1);
    let fills = backend
        .commands()
        .iter()
        .filter(|command| matches!(command, RenderCommand::Fill { .. }))
        .count();
    assert_eq!(fills, 2);
    assert_eq!(backend.commands().len(), 6);

    driver.frame(&mut platform, &mut backend);
    assert_eq!(backend.frames(), 1);

    platform.push(WindowEvent::Pointer(PointerEvent::new(100, 50, PointerKind::Move)));
    driver.frame(&mut platform, &mut backend);
    assert_eq!(backend.frames(), 2);

    // Same position, nothing changes.
    platform.push(WindowEvent::Pointer(PointerEvent::new(100, 50, PointerKind::Move)));
    driver.frame(&mut platform, &mut backend);
    assert_eq!(backend.frames(), 2);
}

/// Test: A close request ends the run and leaves later events queued.
#[test]
fn test_run_until_close() {
    let mut driver = driver(BLUEPRINT);
    let mut platform = HeadlessPlatform::new();
    let mut backend = CommandRecorder::new();
    platform.extend([
        WindowEvent::Other(0x0084),
        WindowEvent::Repaint,
        WindowEvent::CloseRequested,
        WindowEvent::Other(0x0085),
    ]);

    let reason = driver.run(&mut platform, &mut backend);

    assert_eq!(reason, Shutdown::CloseRequested);
    assert_eq!(platform.forwarded(), &[WindowEvent::Other(0x0084)]);
    assert_eq!(platform.pending(), 1);
    assert_eq!(backend.frames(), 1);
    assert_eq!(driver.clock().frame_count(), 1);
}

/// Test: A bounded run stops after the requested frames.
#[test]
fn test_run_frames() {
    let mut driver = driver(BLUEPRINT);
    let mut platform = HeadlessPlatform::new();
    let mut backend = CommandRecorder::new();

    assert_eq!(driver.run_frames(&mut platform, &mut backend, 3), None);
    assert_eq!(driver.clock().frame_count(), 3);
}

static VISITS: Mutex<Vec<f32>> = Mutex::new(Vec::new());

fn record(node: &mut Node, event: HookEvent<'_>) -> bool {
    if let HookEvent::Frame { delta } = event {
        assert!(delta >= Duration::ZERO);
        VISITS.lock().unwrap().push(node.area.x0);
    }
    false
}

/// Test: Frame hooks run in node-array order, which is depth-first creation order.
#[test]
fn test_frame_hooks_in_index_order() {
    let style = r#"
        <Class Name="Full"><Size Width="100" Height="100"/></Class>
        <Class Name="Tenth"><Size Width="10" Height="10"/><Offset Left="10" Top="0"/></Class>
        <Class Name="Mid"><Size Width="10" Height="10"/><Offset Left="50" Top="0"/></Class>"#;
    let mut registry = BehaviorRegistry::new();
    registry.register("Record", record);

    let mut driver = Driver::new(
        MarkupSource::Inline {
            blueprint: r#"
                <Node Class="Full" onFrame="Record">
                    <Node Class="Tenth" onFrame="Record">
                        <Node Class="Mid" onFrame="Record"/>
                    </Node>
                    <Node Class="Mid" onFrame="Record"/>
                </Node>"#
                .into(),
            style: style.into(),
        },
        registry,
        Rect::new(0.0, 0.0, 1000.0, 1000.0),
        FrameClock::new(1000),
    )
    .unwrap();

    driver.update(Duration::from_millis(16));

    assert_eq!(*VISITS.lock().unwrap(), vec![0.0, 100.0, 150.0, 500.0]);
}

/// Test: Missing files surface as I/O errors naming the path.
#[test]
fn test_missing_file_is_io_error() {
    let dir = std::env::temp_dir().join(format!("overlay-cycle-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let blueprint = dir.join("Mainwindow.xml");
    let style = dir.join("Style.xml");
    std::fs::write(&blueprint, BLUEPRINT).unwrap();
    let _ = std::fs::remove_file(&style);

    let mut scene = Scene::new();
    let result = compile_files(Rect::ZERO, &blueprint, &style, &registry(), &mut scene);
    assert!(matches!(result, Err(UiError::Io { path, .. }) if path == style));

    std::fs::write(&style, STYLE).unwrap();
    compile_files(Rect::new(0.0, 0.0, 200.0, 100.0), &blueprint, &style, &registry(), &mut scene).unwrap();
    assert_eq!(scene.nodes[1].area, Rect::new(50.0, 25.0, 150.0, 75.0));

    let _ = std::fs::remove_dir_all(&dir);
}

mod common;

use common::{init_tracing, json, schema, Event, ScriptedUi};
use dread_editor::{RenderOptions, TypeTreeRender, Value, WidgetPath};
use serde_json::json;
use std::sync::Arc;

fn render(tree: &TypeTreeRender, ui: &mut ScriptedUi, value: &mut Value, type_name: &str) -> bool {
    let root = WidgetPath::root(type_name.to_lowercase());
    tree.render_value_of_type(ui, value, type_name, &root)
}

fn level() -> Value {
    let mut level = json(json!({
        "@type": "Level",
        "fTime": 1.5,
        "bActive": true,
        "uCount": 3,
        "sName": "s010_area1",
        "vPos": [1.0, 2.0, 3.0],
        "eColor": "Green",
        "fColors": {"Red": true, "Green": false, "Blue": true},
        "aiNumbers": [1, 2, 3],
        "enemies": [{"hp": 1}, {"hp": 2, "pos": [0.0, 0.5, 0.0]}],
        "dctValues": {"a": 1.0, "b": 2.5},
        "dctByIndex": {"0": 1.0},
        "dctEnemies": {"boss": {"@type": "Boss", "hp": 30, "name": "Kraid"}},
        "pBase": {"@type": "Leaf", "id": 1, "speed": 2.0, "flag": true},
        "pOther": null,
        "pCount": 4,
        "oMystery": 42,
        "lnkTarget": "Root:pScenario:rEntitiesLayer:dctSublayers:default:dctActors:door",
        "oActorDefLink": "actordef:actors/props/door/charclasses/door.bmsad",
    }));
    level
        .as_object_mut()
        .unwrap()
        .insert("blob", Value::Bytes(vec![0xde, 0xad]));
    level
}

#[test]
fn untouched_values_round_trip() {
    init_tracing();
    let tree = TypeTreeRender::new(Arc::new(schema()));
    let original = level();
    let mut value = original.clone();
    let mut ui = ScriptedUi::new();

    assert!(!render(&tree, &mut ui, &mut value, "Level"));
    assert_eq!(value, original);
    assert!(ui.balanced());

    assert_eq!(ui.shown("level.fTime"), Some("1.5"));
    assert_eq!(ui.shown("level.uCount"), Some("3"));
    assert_eq!(ui.combo("level.eColor").unwrap().0, "Green");
    assert_eq!(ui.checkbox("level.fColors.Blue"), Some(true));
    assert_eq!(ui.shown("level.pBase.Deref.id"), Some("1"));
    assert_eq!(ui.shown("level.pCount.Deref"), Some("4"));
    assert_eq!(ui.combo("level.pOther#type").unwrap().0, "None");
    assert!(ui.has_text("Unsupported render of type CUnknownThing"));
    assert!(ui.has_text("Dictionary keys of type int are not supported"));
}

#[test]
fn diagnostics_do_not_stop_siblings() {
    let tree = TypeTreeRender::new(Arc::new(schema()));
    let mut value = level();
    let mut ui = ScriptedUi::new().set_int("level.aiNumbers[0]", 7);

    assert!(render(&tree, &mut ui, &mut value, "Level"));
    assert!(ui.consumed_all());
    assert_eq!(value.as_object().unwrap().get("aiNumbers"), Some(&json(json!([7, 2, 3]))));
}

#[test]
fn boss_shows_inherited_and_own_fields() {
    let tree = TypeTreeRender::new(Arc::new(schema()));
    let mut value = json(json!({"@type": "Boss", "hp": 10}));
    let mut ui = ScriptedUi::new();

    assert!(!render(&tree, &mut ui, &mut value, "Boss"));
    assert_eq!(
        ui.checkbox_ids(),
        ["boss.hp#present", "boss.pos#present", "boss.name#present"]
    );
    assert_eq!(ui.checkbox("boss.hp#present"), Some(true));
    assert_eq!(ui.checkbox("boss.pos#present"), Some(false));
    assert_eq!(ui.checkbox("boss.name#present"), Some(false));
    assert_eq!(ui.shown("boss.hp"), Some("10"));
    let undefined = ui
        .events
        .iter()
        .filter(|e| **e == Event::Disabled("<not defined>".into()))
        .count();
    assert_eq!(undefined, 2);

    let mut ui = ScriptedUi::new().toggle("boss.name#present");
    assert!(render(&tree, &mut ui, &mut value, "Boss"));
    assert_eq!(value, json(json!({"@type": "Boss", "hp": 10, "name": ""})));
}

#[test]
fn presence_toggle_adds_default_and_removes_key() {
    let tree = TypeTreeRender::new(Arc::new(schema()));
    let mut value = Value::tagged("Level");

    let mut ui = ScriptedUi::new().toggle("level.fColors#present");
    assert!(render(&tree, &mut ui, &mut value, "Level"));
    assert_eq!(
        value.as_object().unwrap().get("fColors"),
        Some(&tree.create_default("FColors"))
    );

    let mut ui = ScriptedUi::new().toggle("level.fColors#present");
    assert!(render(&tree, &mut ui, &mut value, "Level"));
    assert!(!value.as_object().unwrap().contains_key("fColors"));
    assert_eq!(value, Value::tagged("Level"));
}

#[test]
fn primitive_edits_are_written_back() {
    let tree = TypeTreeRender::new(Arc::new(schema()));
    let mut value = level();
    let mut ui = ScriptedUi::new()
        .set_floats("level.fTime", &[2.5])
        .toggle("level.bActive")
        .set_int("level.uCount", 9)
        .type_text("level.sName", "s020_magma")
        .set_floats("level.vPos", &[4.0, 5.0, 6.0])
        .select("level.eColor", "Blue")
        .toggle("level.fColors.Green");

    assert!(render(&tree, &mut ui, &mut value, "Level"));
    assert!(ui.consumed_all());

    let fields = value.as_object().unwrap();
    assert_eq!(fields.get("fTime"), Some(&Value::Float(2.5)));
    assert_eq!(fields.get("bActive"), Some(&Value::Bool(false)));
    assert_eq!(fields.get("uCount"), Some(&Value::UInt(9)));
    assert_eq!(fields.get("sName"), Some(&Value::from("s020_magma")));
    assert_eq!(fields.get("vPos"), Some(&json(json!([4.0, 5.0, 6.0]))));
    assert_eq!(fields.get("eColor"), Some(&Value::from("Blue")));
    assert_eq!(
        fields.get("fColors"),
        Some(&json(json!({"Red": true, "Green": true, "Blue": true})))
    );
}

#[test]
fn reselecting_current_enum_label_is_not_a_change() {
    let tree = TypeTreeRender::new(Arc::new(schema()));
    let mut value = Value::from("Green");
    let mut ui = ScriptedUi::new().select("ecolor", "Green");

    assert!(!render(&tree, &mut ui, &mut value, "EColor"));
    assert_eq!(
        ui.combo("ecolor").unwrap().1,
        ["Red".to_string(), "Green".to_string(), "Blue".to_string()]
    );
}

#[test]
fn oversized_integers_are_shown_as_text() {
    let tree = TypeTreeRender::new(Arc::new(schema()));
    let mut value = json(json!({"hp": 1_099_511_627_776i64}));
    let mut ui = ScriptedUi::new().set_int("enemy.hp", 1);

    assert!(!render(&tree, &mut ui, &mut value, "Enemy"));
    assert!(ui.has_text("1099511627776"));
    assert_eq!(ui.shown("enemy.hp"), None);
    assert_eq!(value, json(json!({"hp": 1_099_511_627_776i64})));
}

#[test]
fn mismatched_values_get_a_placeholder() {
    let tree = TypeTreeRender::new(Arc::new(schema()));
    let mut value = json(json!({"hp": "ten", "pos": [1.0, 2.0, 3.0]}));
    let mut ui = ScriptedUi::new().set_floats("enemy.pos", &[0.0, 0.0, 0.0]);

    assert!(render(&tree, &mut ui, &mut value, "Enemy"));
    assert!(ui.has_text("Expected a value of type int, found string"));
    assert_eq!(value, json(json!({"hp": "ten", "pos": [0.0, 0.0, 0.0]})));
}

#[test]
fn read_only_fields_are_shown_as_text() {
    let mut schema = schema();
    schema.mark_read_only("Enemy", "hp").unwrap();
    let tree = TypeTreeRender::new(Arc::new(schema));
    let mut value = json(json!({"@type": "Boss", "hp": 10}));
    let mut ui = ScriptedUi::new().set_int("boss.hp", 99);

    assert!(!render(&tree, &mut ui, &mut value, "Boss"));
    assert!(ui.has_text("10"));
    assert_eq!(ui.shown("boss.hp"), None);
    assert!(!ui.consumed_all());
}

#[test]
fn unknown_root_type_is_a_placeholder() {
    let tree = TypeTreeRender::new(Arc::new(schema()));
    let mut value = Value::Int(1);
    let mut ui = ScriptedUi::new();

    assert!(!render(&tree, &mut ui, &mut value, "CMissing"));
    assert_eq!(ui.texts(), ["Unsupported render of type CMissing"]);
    assert!(tree.uses_one_column("CMissing"));
    assert_eq!(tree.create_default("CMissing"), Value::Null);
}

#[test]
fn layout_follows_type_kind() {
    let tree = TypeTreeRender::new(Arc::new(schema()));
    for one_column in ["int", "TTime", "EColor", "base::math::CVector3D"] {
        assert!(tree.uses_one_column(one_column), "{one_column}");
    }
    for multi_column in ["Enemy", "FColors", "CRntVector<int>", "Base*"] {
        assert!(!tree.uses_one_column(multi_column), "{multi_column}");
    }
}

#[test]
fn large_vectors_start_closed() {
    let options = RenderOptions {
        vector_open_threshold: 3,
        ..Default::default()
    };
    let tree = TypeTreeRender::with_options(Arc::new(schema()), options);
    let mut value = json(json!({"aiNumbers": [1, 2, 3], "enemies": [{"hp": 1}]}));
    let mut ui = ScriptedUi::new();

    render(&tree, &mut ui, &mut value, "Level");
    assert_eq!(ui.tree_node("level.aiNumbers"), Some(false));
    assert_eq!(ui.tree_node("level.enemies"), Some(true));
    assert_eq!(ui.shown("level.aiNumbers[0]"), None);
}

#[test]
fn closed_nodes_hide_their_contents() {
    let tree = TypeTreeRender::new(Arc::new(schema()));
    let mut value = level();
    let mut ui = ScriptedUi::new().close("level.pBase");

    assert!(!render(&tree, &mut ui, &mut value, "Level"));
    assert_eq!(ui.tree_node("level.pBase"), Some(false));
    assert_eq!(ui.combo("level.pBase#type"), None);
    assert!(ui.balanced());
}

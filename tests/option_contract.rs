use serde_json::{Value, json};
use tmon_rs::chart::{line_option, map_option};
use tmon_rs::models::{Dataset, Metric};

fn dataset() -> Dataset {
    Dataset::from_json_str(
        r#"{
          "EXP": {
            "2024": [{"name": "Brazil", "us_value": 2000000000}],
            "2025": [{"name": "Brazil", "us_value": 5000000000},
                     {"name": "Chile",  "us_value": 1000000000}]
          },
          "IMP": {
            "2024": [{"name": "Brazil", "us_value": 1000000000}],
            "2025": [{"name": "Brazil", "us_value": 3000000000}]
          },
          "BAL": {
            "2024": [{"name": "Brazil", "us_value": 1000000000}],
            "2025": [{"name": "Brazil", "us_value": 2000000000}]
          }
        }"#,
    )
    .unwrap()
}

#[test]
fn map_option_fields() {
    let v: Value = serde_json::to_value(map_option(&dataset(), Metric::Exp, 2025)).unwrap();

    assert_eq!(
        v["title"],
        json!({
            "text": "Volume de Exportações (2025)",
            "subtext": "Dados do monitor do comércio brasileiro",
            "left": "center"
        })
    );
    assert_eq!(v["tooltip"]["trigger"], "item");
    assert!(v["tooltip"]["formatter"].as_str().unwrap().starts_with("function (p)"));
    assert_eq!(
        v["visualMap"],
        json!({
            "min": 0.0,
            "max": 5.0,
            "right": 20,
            "top": "middle",
            "text": ["Alto", "Baixo"],
            "calculable": true,
            "orient": "vertical",
            "name": "Volume negociado com o país (Bilhões de US$)",
            "inRange": {"color": ["#e0f3db", "#43a2ca", "#006837"]}
        })
    );
    assert_eq!(
        v["series"],
        json!([{
            "name": "Mapa",
            "type": "map",
            "map": "world",
            "roam": true,
            "emphasis": {"label": {"show": false}},
            "itemStyle": {
                "normal": {"areaColor": "#f5f5f5", "borderColor": "#999"},
                "emphasis": {"areaColor": "#d1e6fa"}
            },
            "data": [
                {"name": "Brazil", "value": 5.0},
                {"name": "Chile", "value": 1.0}
            ]
        }])
    );
    for absent in ["legend", "grid", "xAxis", "yAxis", "dataZoom"] {
        assert!(v.get(absent).is_none(), "{absent} should be omitted");
    }
}

#[test]
fn line_option_fields() {
    let v: Value = serde_json::to_value(line_option(&dataset(), "Brazil")).unwrap();

    assert_eq!(
        v["title"],
        json!({"text": "Totais por ano (Brazil)", "left": "center", "top": 5})
    );
    assert_eq!(v["tooltip"]["trigger"], "axis");
    assert_eq!(
        v["legend"],
        json!({"data": ["Exportações", "Importações", "Balança Comercial"], "top": 50})
    );
    assert_eq!(
        v["grid"],
        json!({"left": "10%", "right": "10%", "bottom": "15%", "top": 90})
    );
    assert_eq!(v["xAxis"], json!({"type": "category", "data": ["2024", "2025"]}));
    assert_eq!(v["yAxis"], json!({"type": "value", "name": "Bilhões US$"}));
    assert_eq!(
        v["dataZoom"],
        json!([
            {"type": "inside", "start": 0.0, "end": 100.0},
            {"type": "slider", "start": 0.0, "end": 100.0, "showDataShadow": false}
        ])
    );
    assert_eq!(
        v["series"],
        json!([
            {"name": "Exportações", "type": "line", "smooth": true, "data": [2.0, 5.0]},
            {"name": "Importações", "type": "line", "smooth": true, "data": [1.0, 3.0]},
            {"name": "Balança Comercial", "type": "line", "smooth": true, "data": [1.0, 2.0]}
        ])
    );
    assert!(v.get("visualMap").is_none());
}

#[test]
fn balance_map_uses_diverging_scale() {
    let v: Value = serde_json::to_value(map_option(&dataset(), Metric::Bal, 2025)).unwrap();
    assert_eq!(v["visualMap"]["min"], -2.0);
    assert_eq!(v["visualMap"]["max"], 2.0);
    assert_eq!(
        v["visualMap"]["inRange"]["color"],
        json!(["#cb181d", "#f7f7f7", "#2171b5"])
    );
    assert_eq!(v["title"]["text"], "Volume de Balança Comercial (2025)");
}

use mmg_signals::facade::CoreState;
use mmg_signals::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

// 测试用宿主：不应被调用
struct NoHost;
#[async_trait::async_trait]
impl HostBridge for NoHost {
    async fn send_message(&self, name: &str, _params: Value) -> anyhow::Result<Value> {
        anyhow::bail!("unexpected host message {name}")
    }
}

fn core() -> Core {
    Core::initialized(Arc::new(NoHost), CoreConfig::default()).expect("core init")
}

const CORE_SIGNALS: [&str; 7] = [
    "init-app-runner",
    "init-web-worker",
    "home-page",
    "navigation-request",
    "uri-changed",
    "last-page",
    "append-preferences",
];

#[test]
fn core_declares_its_signals_in_order() {
    let core = core();
    assert_eq!(core.state(), CoreState::Initialized);
    let names: Vec<String> = core.signal_names().iter().map(|n| n.to_string()).collect();
    assert_eq!(names, CORE_SIGNALS);
    for s in CoreSignal::ALL {
        assert!(core.has_signal(s));
    }
}

#[test]
fn lifecycle_signals_carry_documentation() {
    let core = core();
    let info = core.registry().info(CoreSignal::InitAppRunner).expect("declared");
    assert_eq!(info.summary.as_deref(), Some("Initialize app runner process hook."));
    assert_eq!(info.arity(), 2);
    assert_eq!(info.params[0].name, "init_values");

    let worker = core.registry().info("init-web-worker").expect("declared");
    assert_eq!(worker.summary.as_deref(), Some("Initialize web worker process hook."));
    assert_eq!(worker.arity(), 0);

    // 批量声明的信号不附带文档
    let home = core.registry().info("home-page").expect("declared");
    assert_eq!(home.summary, None);
}

#[test]
fn uninitialized_core_has_no_signals() {
    let core = Core::new(Arc::new(NoHost), CoreConfig::default());
    assert_eq!(core.state(), CoreState::Uninitialized);
    assert!(!core.is_initialized());
    assert!(matches!(
        core.emit(CoreSignal::HomePage, &[]),
        Err(SignalError::UnknownSignal { .. })
    ));
}

#[test]
fn second_init_is_noop() {
    let mut core = core();
    core.init().unwrap();
    assert_eq!(core.signal_names().len(), 7);
    assert!(core.is_initialized());
}

#[test]
fn init_fails_on_predeclared_batch_name_under_strict_policy() {
    let mut core = Core::new(Arc::new(NoHost), CoreConfig::default());
    core.add_signal("last-page").unwrap();
    let err = core.init().unwrap_err();
    assert!(matches!(err, SignalError::DuplicateSignal { ref name, .. } if name == "last-page"));
    assert_eq!(core.state(), CoreState::Uninitialized);
    // 严格模式下整体不生效
    assert!(!core.has_signal("home-page"));
    assert!(!core.has_signal("init-app-runner"));
    assert_eq!(core.signal_names().len(), 1);
}

#[test]
fn init_skips_predeclared_batch_name_under_skip_policy() {
    let cfg = CoreConfig { batch_policy: BatchPolicy::SkipDeclared, ..Default::default() };
    let mut core = Core::new(Arc::new(NoHost), cfg);
    core.add_signal("last-page").unwrap();
    core.init().unwrap();
    assert!(core.is_initialized());
    assert_eq!(core.signal_names().len(), 7);
}

#[test]
fn navigation_request_veto_short_circuits() {
    let core = core();
    let calls = Rc::new(RefCell::new(Vec::<String>::new()));
    let c1 = calls.clone();
    let veto = Listener::new(move |args| {
        c1.borrow_mut().push(format!("veto {}", args[0]));
        Ok(Some(json!(false)))
    });
    let c2 = calls.clone();
    let later = Listener::observer(move |_| c2.borrow_mut().push("later".into()));
    core.connect(CoreSignal::NavigationRequest, &veto).unwrap();
    core.connect(CoreSignal::NavigationRequest, &later).unwrap();

    let out = core
        .emit(CoreSignal::NavigationRequest, &[json!("https://example.org/"), json!(false)])
        .unwrap();
    assert_eq!(out, Some(json!(false)));
    assert_eq!(*calls.borrow(), vec!["veto \"https://example.org/\"".to_string()]);

    // 撤销否决后其余监听者照常执行
    assert!(core.disconnect(CoreSignal::NavigationRequest, &veto).unwrap());
    let out = core
        .emit("navigation-request", &[json!("https://example.org/"), json!(false)])
        .unwrap();
    assert_eq!(out, None);
    assert_eq!(calls.borrow().last().map(String::as_str), Some("later"));
}

#[test]
fn init_app_runner_listener_fills_form() {
    let core = core();
    let fill = Listener::new(|args| {
        let mut values = args.first().cloned().unwrap_or_else(|| json!({}));
        values["variant"] = json!("en");
        Ok(Some(values))
    });
    core.connect(CoreSignal::InitAppRunner, &fill).unwrap();
    let out = core
        .emit(CoreSignal::InitAppRunner, &[json!({}), json!([])])
        .unwrap();
    assert_eq!(out, Some(json!({ "variant": "en" })));
}

#[test]
fn owner_context_detaches_all_of_its_listeners() {
    let core = core();
    let hits = Rc::new(RefCell::new(0u32));
    let owner = ContextToken::new();
    for sig in [CoreSignal::UriChanged, CoreSignal::LastPage, CoreSignal::HomePage] {
        let h = hits.clone();
        let l = Listener::observer(move |_| *h.borrow_mut() += 1);
        core.connect_with_context(sig, &l, owner).unwrap();
    }
    assert_eq!(core.disconnect_context(&owner), 3);
    core.notify(CoreSignal::UriChanged, &[json!("about:blank")]).unwrap();
    assert_eq!(*hits.borrow(), 0);
}

fn fire_home_page<E: SignalEmitter>(emitter: &E) -> Result<Option<Value>> {
    emitter.emit(CoreSignal::HomePage, &[])
}

#[test]
fn core_is_usable_as_generic_emitter() {
    let core = core();
    core.connect(
        CoreSignal::HomePage,
        &Listener::new(|_| Ok(Some(json!("https://home.example")))),
    )
    .unwrap();
    assert_eq!(fire_home_page(&core).unwrap(), Some(json!("https://home.example")));
}

#[test]
fn teardown_releases_listeners() {
    let core = core();
    let marker = Rc::new(());
    let m = marker.clone();
    core.connect(
        CoreSignal::AppendPreferences,
        &Listener::observer(move |_| {
            let _ = &m;
        }),
    )
    .unwrap();
    assert_eq!(Rc::strong_count(&marker), 2);
    core.teardown();
    assert_eq!(Rc::strong_count(&marker), 1);
}

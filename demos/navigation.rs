//! 导航示例：监听 navigation-request 并否决外部地址，同时经宿主桥设置 hide-on-close
use std::sync::Arc;

use mmg_signals::host::ChannelBridge;
use mmg_signals::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // 进程内宿主：应答所有消息
    let (bridge, mut endpoint) = ChannelBridge::channel(8);
    let host = tokio::spawn(async move {
        while let Some(req) = endpoint.recv().await {
            tracing::info!(target = "demo.host", name = %req.message.name, params = %req.message.params);
            req.respond(Ok(json!(true)));
        }
    });

    let core = Core::initialized(Arc::new(bridge), CoreConfig::default())?;

    let allowed = "https://music.example.com/";
    let guard = Listener::new(move |args| {
        let uri = args.first().and_then(Value::as_str).unwrap_or_default();
        if uri.starts_with(allowed) {
            Ok(None)
        } else {
            Ok(Some(json!(false)))
        }
    });
    core.connect(CoreSignal::NavigationRequest, &guard)?;
    core.connect(
        CoreSignal::UriChanged,
        &Listener::observer(|args| tracing::info!(target = "demo.uri", uri = %args[0])),
    )?;

    for uri in ["https://music.example.com/album/1", "https://tracker.example.net/"] {
        let verdict = core.emit(CoreSignal::NavigationRequest, &[json!(uri), json!(false)])?;
        let approved = verdict != Some(json!(false));
        tracing::info!(target = "demo.nav", uri, approved);
        if approved {
            core.notify(CoreSignal::UriChanged, &[json!(uri)])?;
        }
    }

    let answer = core.set_hide_on_close(true).await?;
    tracing::info!(target = "demo.host", %answer, "hide-on-close set");

    core.teardown();
    host.await?;
    Ok(())
}

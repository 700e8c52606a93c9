use worker::*;

pub mod store;

pub use store::LeaderboardDO;

#[event(fetch)]
pub async fn main(req: Request, env: Env, _ctx: worker::Context) -> Result<Response> {
    let router = Router::new();

    router
        .get_async("/", handle_index)
        .get_async("/api/scores", forward_to_board)
        .post_async("/api/scores", forward_to_board)
        .get_async("/api/scores/:username", forward_to_board)
        .run(req, env)
        .await
}

/// Every /api/scores route lands on the single global leaderboard object
async fn forward_to_board(req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let namespace = ctx.env.durable_object("LEADERBOARD")?;
    let stub = namespace.get_by_name("global")?;
    stub.fetch_with_request(req).await
}

async fn handle_index(_req: Request, _ctx: RouteContext<()>) -> Result<Response> {
    // For now, return a simple HTML page
    // In production, this would be served from static assets or R2
    let html = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0, user-scalable=no">
    <title>Gem Hunt</title>
    <style>
        body { margin: 0; padding: 0; display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh; background: #1a1a2e; color: #fff; font-family: monospace; touch-action: none; }
        #canvas { border: 2px solid #444; background: #16213e; border-radius: 8px; max-width: 100vw; max-height: 80vh; }
        #ui { margin-top: 16px; text-align: center; }
        #status { margin: 10px 0; padding: 10px; background: #333; border-radius: 4px; }
        #hint { font-size: 12px; color: #888; }
    </style>
</head>
<body>
    <canvas id="canvas" width="600" height="600"></canvas>
    <div id="ui">
        <div id="status">Loading WASM...</div>
        <div id="hint">Tap the gem that stays still. Arrow keys move the cursor, Enter selects.</div>
    </div>
    <script type="module">
        import init, { boot } from './pkg/client_wasm.js';

        function updateStatus(msg) {
            const el = document.getElementById('status');
            if (el) el.textContent = msg;
            console.log('Status:', msg);
        }

        async function main() {
            try {
                await init();
                updateStatus('WASM loaded');
                boot('canvas');
                updateStatus('Ready - press any key or tap to start');
            } catch (error) {
                console.error('Error:', error);
                updateStatus('Error: ' + error.message);
            }
        }

        main();
    </script>
</body>
</html>"#;
    Response::from_html(html)
}

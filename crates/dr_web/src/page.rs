pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Embodied AI &amp; Autonomous Driving Radar</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 0; display: flex; min-height: 100vh; }
        aside { width: 300px; padding: 20px; background: #f4f5f7; border-right: 1px solid #ddd; }
        aside label { display: block; margin-top: 12px; font-size: 14px; }
        aside input, aside textarea { width: 100%; box-sizing: border-box; padding: 6px; }
        aside textarea { height: 120px; }
        main { flex: 1; padding: 20px 40px; max-width: 960px; }
        button { padding: 8px 16px; background: #007bff; color: white; border: none; border-radius: 4px; cursor: pointer; }
        button:disabled { background: #8aa; cursor: wait; }
        .tabs button { background: #e9ecef; color: #333; }
        .tabs button.active { background: #007bff; color: white; }
        .panel { display: none; margin-top: 20px; }
        .panel.active { display: block; }
        .warning { background: #fff3cd; padding: 8px; border-radius: 4px; margin-top: 12px; }
        .error { background: #f8d7da; padding: 10px; border-radius: 4px; }
        .success { background: #d4edda; padding: 10px; border-radius: 4px; }
        .summary { background: #cce5ff; padding: 10px; border-radius: 4px; white-space: pre-wrap; margin-top: 8px; }
        .caption { color: #666; font-size: 13px; }
        details { border: 1px solid #ddd; border-radius: 4px; padding: 8px 12px; margin: 8px 0; }
        .abstract { white-space: pre-wrap; font-size: 14px; }
        .news-item { border-bottom: 1px solid #ddd; padding: 12px 0; }
    </style>
</head>
<body>
    <aside>
        <h2>Settings</h2>
        <div id="key-field">
            <label for="api-key">DeepSeek/OpenAI API key</label>
            <input id="api-key" type="password">
        </div>
        <div id="warning" class="warning" style="display: none"></div>
        <label for="base-url">API base URL</label>
        <input id="base-url" value="https://api.deepseek.com">
        <label for="model-name">Model name</label>
        <input id="model-name" value="deepseek-chat">
        <hr>
        <label for="keywords">Keywords (one per line)</label>
        <textarea id="keywords">Embodied AI
Autonomous Driving
Humanoid Robot
End-to-end Driving</textarea>
        <p><button onclick="saveSettings()">Apply</button></p>
    </aside>
    <main>
        <h1>Embodied AI &amp; Autonomous Driving Radar</h1>
        <div class="tabs">
            <button id="tab-papers" class="active" onclick="showTab('papers')">Latest papers (arXiv)</button>
            <button id="tab-news" onclick="showTab('news')">Industry news (RSS)</button>
        </div>
        <section id="panel-papers" class="panel active">
            <button onclick="scanPapers(this)">Scan latest papers</button>
            <div id="papers"></div>
        </section>
        <section id="panel-news" class="panel">
            <p class="caption">News comes from one fixed TechCrunch AI feed and ignores the keywords.</p>
            <button onclick="scanNews(this)">Scan latest news</button>
            <div id="news"></div>
        </section>
    </main>

    <script>
    let sessionId = null;

    function settingsInput() {
        return {
            api_key: document.getElementById('api-key').value,
            base_url: document.getElementById('base-url').value,
            model_name: document.getElementById('model-name').value,
            keywords: document.getElementById('keywords').value,
        };
    }

    function escapeHtml(text) {
        const div = document.createElement('div');
        div.textContent = text;
        return div.innerHTML;
    }

    async function request(method, path, body) {
        const response = await fetch(path, {
            method,
            headers: { 'Content-Type': 'application/json' },
            body: body === undefined ? undefined : JSON.stringify(body),
        });
        const data = await response.json();
        if (!response.ok) {
            throw new Error(data.error || response.statusText);
        }
        return data;
    }

    function applyView(view) {
        sessionId = view.id;
        document.getElementById('key-field').style.display =
            view.settings.api_key_provisioned ? 'none' : 'block';
        const warning = document.getElementById('warning');
        warning.style.display = view.warning ? 'block' : 'none';
        warning.textContent = view.warning || '';
    }

    async function saveSettings() {
        applyView(await request('PUT', `/api/sessions/${sessionId}/settings`, settingsInput()));
    }

    function showTab(name) {
        for (const tab of ['papers', 'news']) {
            document.getElementById(`tab-${tab}`).classList.toggle('active', tab === name);
            document.getElementById(`panel-${tab}`).classList.toggle('active', tab === name);
        }
    }

    async function withBusy(button, target, action) {
        button.disabled = true;
        try {
            await action();
        } catch (error) {
            target.innerHTML = `<p class="error">${escapeHtml(error.message)}</p>`;
        } finally {
            button.disabled = false;
        }
    }

    async function scanPapers(button) {
        const target = document.getElementById('papers');
        await withBusy(button, target, async () => {
            target.innerHTML = '<p class="caption">Connecting to arXiv...</p>';
            const papers = await request('POST', `/api/sessions/${sessionId}/papers`);
            target.innerHTML = `<p class="success">Found ${papers.length} recent papers</p>`;
            papers.forEach((paper, i) => {
                const item = document.createElement('details');
                item.innerHTML = `
                    <summary>[${escapeHtml(paper.date)}] ${escapeHtml(paper.title)}</summary>
                    <p><strong>PDF</strong>: <a href="${escapeHtml(paper.link)}" target="_blank">${escapeHtml(paper.link)}</a></p>
                    <button>AI interpret</button>
                    <div class="result"><p class="caption">Click the button above for a Chinese AI summary</p>
                    <div class="abstract">${escapeHtml(paper.summary)}</div></div>`;
                item.querySelector('button').onclick = (e) =>
                    summarize(e.target, 'papers', paper.link, item.querySelector('.result'));
                target.appendChild(item);
            });
        });
    }

    async function scanNews(button) {
        const target = document.getElementById('news');
        await withBusy(button, target, async () => {
            const entries = await request('POST', `/api/sessions/${sessionId}/news`);
            target.innerHTML = '';
            entries.forEach((entry) => {
                const item = document.createElement('div');
                item.className = 'news-item';
                item.innerHTML = `
                    <p><strong>[${escapeHtml(entry.published_label)}] ${escapeHtml(entry.title)}</strong></p>
                    <p><a href="${escapeHtml(entry.link)}" target="_blank">Read the original</a></p>
                    <button>AI digest</button>
                    <div class="result"></div>`;
                item.querySelector('button').onclick = (e) =>
                    summarize(e.target, 'news', entry.link, item.querySelector('.result'));
                target.appendChild(item);
            });
        });
    }

    async function summarize(button, kind, link, target) {
        await withBusy(button, target, async () => {
            const data = await request('POST', `/api/sessions/${sessionId}/${kind}/summary`, { link });
            if (data.summary) {
                target.innerHTML = `<div class="summary">${escapeHtml(data.summary)}</div>`;
            }
        });
    }

    request('POST', '/api/sessions', settingsInput()).then(applyView);

    window.addEventListener('pagehide', () => {
        if (sessionId) {
            fetch(`/api/sessions/${sessionId}`, { method: 'DELETE', keepalive: true });
        }
    });
    </script>
</body>
</html>
"#;

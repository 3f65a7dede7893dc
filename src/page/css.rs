//! Dashboard CSS styles
//!
//! Theme colours live in custom properties on `:root`.

pub const STYLES: &str = r"
*, *::before, *::after { box-sizing: border-box; }
html, body, h1, p, ul { margin: 0; padding: 0; }

:root {
    --surface: #10141b;
    --panel: #181e27;
    --line: #2a3340;
    --ink: #dde3ea;
    --muted: #8a96a6;
    --accent: #2aabee;
    --danger: #ef5b5b;
    --radius: 10px;
}

body {
    font: 14px/1.5 system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif;
    background: var(--surface);
    color: var(--ink);
    padding: 24px 16px;
}

.container { max-width: 1080px; margin: 0 auto; }
.hidden { display: none !important; }
.dim, .hint, .subtitle { color: var(--muted); }

/* Top bar */
header {
    display: flex;
    flex-wrap: wrap;
    align-items: flex-end;
    justify-content: space-between;
    gap: 12px;
    padding-bottom: 14px;
    margin-bottom: 20px;
    border-bottom: 1px solid var(--line);
}

h1 { font-size: 22px; letter-spacing: 0.2px; }
.subtitle { font-size: 12px; }
.header-controls { display: flex; gap: 10px; align-items: center; }
.user-badge { color: var(--accent); font-weight: 600; }

.btn {
    border: 1px solid var(--line);
    border-radius: 999px;
    background: transparent;
    color: var(--ink);
    padding: 6px 14px;
    cursor: pointer;
}

.btn-secondary:hover { border-color: var(--danger); color: var(--danger); }

/* Panels */
.grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
    gap: 14px;
}

.wide { grid-column: 1 / -1; }

.card {
    background: var(--panel);
    border: 1px solid var(--line);
    border-radius: var(--radius);
    padding: 18px;
}

.card-header { margin-bottom: 12px; }

.card-title {
    font-size: 12px;
    font-weight: 600;
    text-transform: uppercase;
    letter-spacing: 0.8px;
    color: var(--muted);
}

.card-value { font-size: 30px; font-weight: 700; font-variant-numeric: tabular-nums; }

.hint { margin-bottom: 14px; }
.login-widget { min-height: 44px; }

/* Token and transaction lists */
.item-list { list-style: none; }
.item-list li { padding: 9px 0; border-top: 1px solid var(--line); }
.item-list li:first-child { border-top: 0; }
.item-list code { font-size: 12px; color: var(--muted); }
.item-list a { color: var(--accent); }

@media (max-width: 560px) {
    body { padding: 16px 10px; }
    .card-value { font-size: 24px; }
}
";

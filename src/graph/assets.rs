//! Embedded web assets for the lineage viewer

use super::data::GraphData;

/// Marker replaced by the inlined payload in exported pages.
const DATA_PLACEHOLDER: &str = "/*__GRAPH_DATA__*/null";

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Lineagemap - Data Lineage</title>
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
            background: #1a1a2e;
            color: #eee;
            overflow: hidden;
        }

        #container {
            display: flex;
            height: 100vh;
        }

        #canvas-scroll {
            flex: 1;
            overflow: auto;
            background: #16213e;
        }

        #canvas {
            position: relative;
            min-width: 2000px;
            min-height: 2000px;
        }

        #edges {
            position: absolute;
            top: 0;
            left: 0;
            pointer-events: none;
        }

        .edge {
            fill: none;
            stroke: #94a3b8;
            stroke-width: 2;
            opacity: 0.7;
        }

        .edge.dangling {
            stroke: #ff6b6b;
            stroke-dasharray: 6 4;
        }

        .edge.highlighted {
            stroke: #00d9ff;
            opacity: 1;
            stroke-width: 3;
        }

        .node {
            position: absolute;
            width: 160px;
            min-height: 80px;
            padding: 12px;
            border-radius: 8px;
            background: #2bb673;
            color: #fff;
            box-shadow: 0 4px 12px rgba(0, 0, 0, 0.4);
            cursor: grab;
            user-select: none;
            z-index: 10;
            transition: transform 0.15s;
        }

        .node.dragging {
            cursor: grabbing;
            z-index: 30;
        }

        .node.highlighted {
            background: #1e9e5f;
            transform: scale(1.1);
            z-index: 20;
        }

        .node.selected {
            outline: 3px solid #00d9ff;
        }

        .node-label {
            font-weight: bold;
            text-align: center;
            word-break: break-word;
        }

        .node-id {
            margin-top: 6px;
            font-size: 0.7em;
            opacity: 0.7;
            text-align: center;
            word-break: break-all;
        }

        .node-delete {
            position: absolute;
            top: 4px;
            right: 6px;
            background: none;
            border: none;
            color: #fff;
            cursor: pointer;
            opacity: 0.6;
        }

        .node-delete:hover {
            opacity: 1;
        }

        #sidebar {
            width: 320px;
            background: #1a1a2e;
            border-left: 1px solid #333;
            padding: 20px;
            overflow-y: auto;
        }

        h1 {
            font-size: 1.4em;
            margin-bottom: 10px;
            color: #00d9ff;
        }

        h2 {
            font-size: 1.1em;
            margin: 15px 0 10px;
            color: #888;
            text-transform: uppercase;
            letter-spacing: 1px;
        }

        .stat {
            display: flex;
            justify-content: space-between;
            padding: 8px 0;
            border-bottom: 1px solid #333;
        }

        .stat-value {
            color: #00d9ff;
            font-weight: bold;
        }

        .group-row {
            display: flex;
            justify-content: space-between;
            align-items: center;
            padding: 6px 0;
            border-bottom: 1px solid #333;
        }

        .group-row button {
            background: #2563eb;
            color: #fff;
            border: none;
            border-radius: 4px;
            padding: 2px 8px;
            cursor: pointer;
        }

        .group-row.collapsed .group-name {
            opacity: 0.5;
        }

        #node-info {
            display: none;
            margin-top: 20px;
            padding: 15px;
            background: #16213e;
            border-radius: 8px;
            word-break: break-all;
        }

        #node-info.visible {
            display: block;
        }
    </style>
</head>
<body>
    <div id="container">
        <div id="canvas-scroll">
            <div id="canvas">
                <svg id="edges">
                    <defs>
                        <marker id="arrowhead" viewBox="0 -5 10 10" refX="10" refY="0"
                                markerWidth="8" markerHeight="8" orient="auto">
                            <path d="M0,-5L10,0L0,5" fill="#94a3b8"></path>
                        </marker>
                    </defs>
                </svg>
            </div>
        </div>
        <div id="sidebar">
            <h1 id="title">Lineage</h1>
            <div class="stat"><span>Nodes</span><span class="stat-value" id="stat-nodes">0</span></div>
            <div class="stat"><span>Edges</span><span class="stat-value" id="stat-edges">0</span></div>
            <div class="stat"><span>Groups</span><span class="stat-value" id="stat-groups">0</span></div>
            <div class="stat"><span>Dangling edges</span><span class="stat-value" id="stat-dangling">0</span></div>
            <div class="stat"><span>Repeated edges</span><span class="stat-value" id="stat-duplicates">0</span></div>
            <div class="stat"><span>Grouped by</span><span class="stat-value" id="stat-group-by"></span></div>
            <h2>Groups</h2>
            <div id="groups"></div>
            <div id="node-info"></div>
        </div>
    </div>

    <script>
        const EMBEDDED_DATA = /*__GRAPH_DATA__*/null;

        const NODE_WIDTH = 160;
        const SCROLL_MARGIN = 100;
        const EXPAND_INCREMENT = 200;

        let graphData;
        let positions = {};
        const collapsedGroups = new Set();
        const deletedNodes = new Set();
        let hoveredNode = null;
        let selectedNode = null;

        function visibleNodes() {
            return graphData.nodes.filter(n =>
                !deletedNodes.has(n.id) && !(n.group && collapsedGroups.has(n.group)));
        }

        function visibleEdges() {
            const shown = new Set(visibleNodes().map(n => n.id));
            const known = new Set(graphData.nodes.map(n => n.id));
            // dangling endpoints have no box; skip only when a real endpoint is hidden
            return graphData.edges.filter(e =>
                (shown.has(e.source) || !known.has(e.source)) &&
                (shown.has(e.target) || !known.has(e.target)) &&
                (shown.has(e.source) || shown.has(e.target)));
        }

        function updateStats() {
            const meta = graphData.metadata;
            document.getElementById('title').textContent = meta.title;
            document.title = 'Lineagemap - ' + meta.title;
            document.getElementById('stat-nodes').textContent = meta.total_nodes;
            document.getElementById('stat-edges').textContent = meta.total_edges;
            document.getElementById('stat-groups').textContent = meta.total_groups;
            document.getElementById('stat-dangling').textContent = meta.dangling_edges;
            document.getElementById('stat-duplicates').textContent = meta.duplicate_edges;
            document.getElementById('stat-group-by').textContent = meta.group_by;
        }

        function renderGroups() {
            const container = document.getElementById('groups');
            container.innerHTML = '';
            graphData.groups.forEach(group => {
                const members = new Set(group.node_ids);
                const row = document.createElement('div');
                row.className = 'group-row' + (collapsedGroups.has(group.key) ? ' collapsed' : '');

                const name = document.createElement('span');
                name.className = 'group-name';
                name.textContent = `${group.key} (${members.size})`;

                const toggle = document.createElement('button');
                toggle.textContent = collapsedGroups.has(group.key) ? 'Expand' : 'Collapse';
                toggle.addEventListener('click', () => {
                    if (collapsedGroups.has(group.key)) {
                        collapsedGroups.delete(group.key);
                    } else {
                        collapsedGroups.add(group.key);
                    }
                    render();
                });

                row.appendChild(name);
                row.appendChild(toggle);
                container.appendChild(row);
            });
        }

        function renderNodes() {
            const canvas = document.getElementById('canvas');
            canvas.querySelectorAll('.node').forEach(el => el.remove());

            visibleNodes().forEach(node => {
                const pos = positions[node.id];
                const el = document.createElement('div');
                el.className = 'node';
                el.id = 'node-' + node.id;
                el.style.left = pos.x + 'px';
                el.style.top = pos.y + 'px';
                if (node.id === hoveredNode) el.classList.add('highlighted');
                if (node.id === selectedNode) el.classList.add('selected', 'highlighted');

                const label = document.createElement('div');
                label.className = 'node-label';
                label.textContent = node.label || '(unlabeled)';

                const id = document.createElement('div');
                id.className = 'node-id';
                id.textContent = node.id;

                const del = document.createElement('button');
                del.className = 'node-delete';
                del.title = 'Remove from view';
                del.textContent = '×';
                del.addEventListener('mousedown', e => e.stopPropagation());
                del.addEventListener('click', e => {
                    e.stopPropagation();
                    deletedNodes.add(node.id);
                    if (selectedNode === node.id) selectNode(null);
                    render();
                });

                el.appendChild(del);
                el.appendChild(label);
                el.appendChild(id);

                el.addEventListener('mouseenter', () => { hoveredNode = node.id; highlight(); });
                el.addEventListener('mouseleave', () => { hoveredNode = null; highlight(); });
                el.addEventListener('mousedown', e => startDrag(e, node, el));

                canvas.appendChild(el);
            });
        }

        function anchor(id, towards) {
            const el = document.getElementById('node-' + id);
            if (!el) {
                // dangling endpoint: draw a short stub next to the known side
                const other = positions[towards];
                return { x: other.x + NODE_WIDTH / 2, y: other.y - 60 };
            }
            return {
                x: el.offsetLeft + el.offsetWidth / 2,
                y: el.offsetTop + el.offsetHeight / 2
            };
        }

        function renderEdges() {
            const svg = document.getElementById('edges');
            const canvas = document.getElementById('canvas');
            svg.setAttribute('width', canvas.scrollWidth);
            svg.setAttribute('height', canvas.scrollHeight);
            svg.querySelectorAll('path.edge').forEach(el => el.remove());

            visibleEdges().forEach(edge => {
                const start = anchor(edge.source, edge.target);
                const end = anchor(edge.target, edge.source);
                const midX = (start.x + end.x) / 2;
                const path = document.createElementNS('http://www.w3.org/2000/svg', 'path');
                path.setAttribute('d', `M${start.x},${start.y} C${midX},${start.y} ${midX},${end.y} ${end.x},${end.y}`);
                path.setAttribute('class', 'edge' + (edge.dangling ? ' dangling' : ''));
                path.setAttribute('marker-end', 'url(#arrowhead)');
                path.dataset.source = edge.source;
                path.dataset.target = edge.target;
                svg.appendChild(path);
            });
            highlight();
        }

        function highlight() {
            const active = hoveredNode || selectedNode;
            document.querySelectorAll('.node').forEach(el => {
                const id = el.id.slice('node-'.length);
                el.classList.toggle('highlighted', id === hoveredNode || id === selectedNode);
            });
            document.querySelectorAll('path.edge').forEach(el => {
                el.classList.toggle('highlighted',
                    !!active && (el.dataset.source === active || el.dataset.target === active));
            });
        }

        function selectNode(id) {
            selectedNode = selectedNode === id ? null : id;
            const info = document.getElementById('node-info');
            const node = graphData.nodes.find(n => n.id === selectedNode);
            if (!node) {
                info.classList.remove('visible');
                highlight();
                return;
            }
            const incoming = graphData.edges.filter(e => e.target === node.id).length;
            const outgoing = graphData.edges.filter(e => e.source === node.id).length;
            info.innerHTML = '';
            [
                ['Label', node.label || '(unlabeled)'],
                ['Id', node.id],
                ['Group', node.group || '(none)'],
                ['Incoming', incoming],
                ['Outgoing', outgoing]
            ].forEach(([k, v]) => {
                const row = document.createElement('div');
                row.className = 'stat';
                const key = document.createElement('span');
                key.textContent = k;
                const value = document.createElement('span');
                value.className = 'stat-value';
                value.textContent = v;
                row.appendChild(key);
                row.appendChild(value);
                info.appendChild(row);
            });
            info.classList.add('visible');
            highlight();
        }

        function growCanvas(x, y) {
            const canvas = document.getElementById('canvas');
            const scroll = document.getElementById('canvas-scroll');
            if (x + NODE_WIDTH + SCROLL_MARGIN > canvas.offsetWidth) {
                canvas.style.minWidth = (canvas.offsetWidth + EXPAND_INCREMENT) + 'px';
            }
            if (y + SCROLL_MARGIN * 2 > canvas.offsetHeight) {
                canvas.style.minHeight = (canvas.offsetHeight + EXPAND_INCREMENT) + 'px';
            }
            if (x + NODE_WIDTH + SCROLL_MARGIN > scroll.scrollLeft + scroll.clientWidth) {
                scroll.scrollLeft += 10;
            }
            if (y + SCROLL_MARGIN * 2 > scroll.scrollTop + scroll.clientHeight) {
                scroll.scrollTop += 10;
            }
        }

        function startDrag(event, node, el) {
            event.preventDefault();
            const startX = event.clientX;
            const startY = event.clientY;
            const origin = { ...positions[node.id] };
            let moved = false;
            el.classList.add('dragging');

            function onMove(e) {
                const dx = e.clientX - startX;
                const dy = e.clientY - startY;
                if (Math.abs(dx) + Math.abs(dy) > 3) moved = true;
                const x = Math.max(0, origin.x + dx);
                const y = Math.max(0, origin.y + dy);
                positions[node.id] = { x, y };
                el.style.left = x + 'px';
                el.style.top = y + 'px';
                growCanvas(x, y);
                renderEdges();
            }

            function onUp() {
                el.classList.remove('dragging');
                window.removeEventListener('mousemove', onMove);
                window.removeEventListener('mouseup', onUp);
                if (!moved) selectNode(node.id);
            }

            window.addEventListener('mousemove', onMove);
            window.addEventListener('mouseup', onUp);
        }

        function render() {
            renderGroups();
            renderNodes();
            renderEdges();
        }

        function applyData(data) {
            // keep dragged positions across reloads
            const previous = positions;
            positions = {};
            data.nodes.forEach(n => {
                positions[n.id] = previous[n.id] || { x: n.x, y: n.y };
            });
            graphData = data;
            updateStats();
            render();
        }

        async function fetchGraph() {
            const response = await fetch('/api/graph');
            return response.json();
        }

        // Server-Sent Events for live updates (watch mode)
        function setupSSE() {
            const evtSource = new EventSource('/api/events');

            evtSource.addEventListener('update', async (event) => {
                console.log('Graph update received, version:', event.data);
                applyData(await fetchGraph());

                const indicator = document.createElement('div');
                indicator.style.cssText = 'position:fixed;top:10px;left:50%;transform:translateX(-50%);background:#00d9ff;color:#000;padding:8px 16px;border-radius:4px;font-weight:bold;z-index:9999;';
                indicator.textContent = 'Graph Updated';
                document.body.appendChild(indicator);
                setTimeout(() => indicator.remove(), 2000);
            });

            evtSource.onerror = () => {
                console.log('SSE connection lost, reconnecting...');
            };
        }

        window.addEventListener('resize', () => renderEdges());

        async function init() {
            if (EMBEDDED_DATA) {
                applyData(EMBEDDED_DATA);
                return;
            }
            applyData(await fetchGraph());
            setupSSE();
        }

        init();
    </script>
</body>
</html>
"##;

/// Viewer page with the payload inlined, for offline viewing.
pub fn generate_static_html(graph_data: &GraphData) -> Result<String, serde_json::Error> {
    // "</" inside a JSON string would close the script element early
    let json = serde_json::to_string(graph_data)?.replace("</", "<\\/");
    Ok(INDEX_HTML.replacen(DATA_PLACEHOLDER, &json, 1))
}

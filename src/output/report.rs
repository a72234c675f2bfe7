use super::RowRecord;

fn json_for_script_tag(value: &str) -> String {
    value.replace("</", "<\\/")
}

pub fn render_html(records: &[RowRecord]) -> Vec<u8> {
    let json = serde_json::to_string(records).unwrap_or_else(|_| "[]".to_string());
    let json = json_for_script_tag(&json);

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Book Catalog</title>
  <script src="https://cdn.tailwindcss.com?plugins=forms,container-queries"></script>
  <link href="https://fonts.googleapis.com/css2?family=Material+Symbols+Outlined:wght,FILL@100..700,0..1&amp;display=swap" rel="stylesheet"/>
  <link href="https://fonts.googleapis.com/css2?family=Montserrat:wght@700;800&amp;family=Inter:wght@400;500;600;700&amp;display=swap" rel="stylesheet"/>
  <script id="tailwind-config">
    tailwind.config = {{
      darkMode: "class",
      theme: {{
        extend: {{
          colors: {{
            "primary": "#135bec",
            "background-light": "#f8fafc",
            "background-dark": "#0f172a"
          }},
          fontFamily: {{
            "sans": ["Inter", "sans-serif"],
            "display": ["Montserrat", "sans-serif"]
          }}
        }}
      }}
    }};
  </script>
  <style type="text/tailwindcss">
    .material-symbols-outlined {{
      font-variation-settings: 'FILL' 0, 'wght' 400, 'GRAD' 0, 'opsz' 24;
    }}
    body {{
      font-family: 'Inter', sans-serif;
    }}
    h1, h2, h3 {{
      font-family: 'Montserrat', sans-serif;
      font-weight: 800;
      letter-spacing: -0.025em;
    }}
  </style>
</head>
<body class="bg-background-light dark:bg-background-dark text-slate-900 dark:text-slate-100 min-h-screen">
  <script type="application/json" id="records-data">{json}</script>
  <div class="flex min-h-screen flex-col">
    <header class="flex items-center justify-between border-b border-slate-200 dark:border-slate-800 bg-white dark:bg-slate-900 px-8 py-4 sticky top-0 z-40">
      <div class="flex items-center gap-4">
        <div class="size-10 bg-primary rounded-xl flex items-center justify-center text-white shadow-lg shadow-primary/20">
          <span class="material-symbols-outlined text-[24px]">menu_book</span>
        </div>
        <h2 class="text-slate-900 dark:text-white text-xl font-display uppercase tracking-tight">Book Catalog</h2>
      </div>
    </header>

    <main class="flex-1 max-w-[1200px] mx-auto w-full px-8 py-10">
      <div class="bg-white dark:bg-slate-900 rounded-2xl border border-slate-200 dark:border-slate-800 p-5 mb-8 shadow-sm">
        <div class="flex flex-1 min-w-[280px] items-center gap-3 bg-slate-50 dark:bg-slate-800/50 rounded-xl px-4 py-3 border border-slate-200 dark:border-slate-700 focus-within:border-primary transition-all">
          <span class="material-symbols-outlined text-slate-400">search</span>
          <input id="search" class="bg-transparent border-none focus:ring-0 text-sm w-full text-slate-900 dark:text-white placeholder:text-slate-400 font-medium" placeholder="Search books by title..." type="text"/>
        </div>
      </div>

      <noscript>
        <div class="bg-amber-50 border border-amber-200 rounded-2xl p-5 mb-8">
          <div class="text-amber-800 font-bold">This catalog requires JavaScript to render.</div>
        </div>
      </noscript>

      <div class="bg-white dark:bg-slate-900 border border-slate-200 dark:border-slate-800 rounded-2xl overflow-hidden shadow-sm">
        <div class="overflow-x-auto">
          <table class="w-full text-left border-collapse">
            <thead>
              <tr class="bg-slate-50 dark:bg-slate-800/50 border-b border-slate-200 dark:border-slate-800">
                <th id="sort-no" role="button" tabindex="0" aria-sort="ascending" class="px-6 py-5 text-[11px] font-display text-slate-900 dark:text-slate-200 uppercase tracking-widest cursor-pointer select-none">No. <span class="sort-arrow"></span></th>
                <th id="sort-title" role="button" tabindex="0" aria-sort="none" class="px-6 py-5 text-[11px] font-display text-slate-900 dark:text-slate-200 uppercase tracking-widest cursor-pointer select-none">Title <span class="sort-arrow"></span></th>
                <th class="px-6 py-5 text-[11px] font-display text-slate-900 dark:text-slate-200 uppercase tracking-widest">PDF</th>
                <th class="px-6 py-5 text-[11px] font-display text-slate-900 dark:text-slate-200 uppercase tracking-widest">Audio</th>
                <th class="px-6 py-5 text-[11px] font-display text-slate-900 dark:text-slate-200 uppercase tracking-widest">Cover</th>
              </tr>
            </thead>
            <tbody id="book-table-body" class="divide-y divide-slate-100 dark:divide-slate-800"></tbody>
          </table>
        </div>
        <div class="px-8 py-5 border-t border-slate-100 dark:border-slate-800 bg-slate-50 dark:bg-slate-800/50">
          <p id="results-total" class="text-sm text-slate-500 dark:text-slate-400 font-bold">0 BOOKS</p>
        </div>
      </div>
    </main>

    <footer class="mt-auto py-8 border-t border-slate-200 dark:border-slate-800 text-center">
      <p class="text-xs font-bold text-slate-400 dark:text-slate-500 uppercase tracking-widest">BOOK CATALOG</p>
    </footer>
  </div>

  <div id="cover-modal" class="hidden fixed inset-0 z-50 flex items-center justify-center bg-slate-900/70 p-6">
    <div class="bg-white dark:bg-slate-900 rounded-2xl shadow-xl max-w-md w-full overflow-hidden">
      <div class="flex items-center justify-between px-6 py-4 border-b border-slate-200 dark:border-slate-800">
        <h3 id="cover-modal-title" class="text-lg text-slate-900 dark:text-white"></h3>
        <button id="cover-modal-close" class="flex size-9 items-center justify-center rounded-lg hover:bg-slate-100 dark:hover:bg-slate-800 text-slate-500" type="button">
          <span class="material-symbols-outlined">close</span>
        </button>
      </div>
      <div class="p-6 flex justify-center">
        <img id="cover-modal-image" class="max-h-[70vh] rounded-lg" src="" alt=""/>
      </div>
    </div>
  </div>

  <script>
    (function() {{
      function escapeHtml(value) {{
        return String(value)
          .replaceAll('&', '&amp;')
          .replaceAll('<', '&lt;')
          .replaceAll('>', '&gt;')
          .replaceAll('"', '&quot;')
          .replaceAll("'", '&#39;');
      }}

      const raw = document.getElementById('records-data').textContent || '[]';
      const records = JSON.parse(raw);

      const tableBody = document.getElementById('book-table-body');
      const resultsTotal = document.getElementById('results-total');
      const searchEl = document.getElementById('search');
      const sortNo = document.getElementById('sort-no');
      const sortTitle = document.getElementById('sort-title');
      const modal = document.getElementById('cover-modal');
      const modalTitle = document.getElementById('cover-modal-title');
      const modalImage = document.getElementById('cover-modal-image');
      const modalClose = document.getElementById('cover-modal-close');

      const state = {{
        query: '',
        sort: {{ column: 'no', ascending: true }}
      }};

      function toggleSort(column) {{
        if (state.sort.column === column) {{
          state.sort.ascending = !state.sort.ascending;
        }} else {{
          state.sort.column = column;
          state.sort.ascending = true;
        }}
        render();
      }}

      function filtered() {{
        const needle = state.query.toLowerCase().trim();
        if (needle === '') return records.slice();
        return records.filter(r => String(r.title).toLowerCase().includes(needle));
      }}

      // Rows get a provisional index from their pre-sort order and are
      // renumbered by final position after sorting, same as the live page.
      function buildRows(items) {{
        const rows = items.map((r, index) => ({{
          no: index + 1,
          title: r.title,
          pdf_url: r.pdf_url,
          audio_url: r.audio_url,
          cover_url: r.cover_url
        }}));
        rows.sort((a, b) => {{
          let comparison = 0;
          if (state.sort.column === 'no') {{
            comparison = a.no - b.no;
          }} else if (state.sort.column === 'title') {{
            comparison = a.title.localeCompare(b.title);
          }}
          return state.sort.ascending ? comparison : -comparison;
        }});
        rows.forEach((row, index) => {{ row.no = index + 1; }});
        return rows;
      }}

      function bookSchema(title) {{
        return JSON.stringify({{
          "@context": "https://schema.org",
          "@type": "Book",
          "name": title,
          "description": `Free download of the book: ${{title}} in PDF and MP3 format.`,
          "url": window.location.href,
          "offers": {{
            "@type": "Offer",
            "price": "0",
            "priceCurrency": "USD",
            "availability": "https://schema.org/InStock",
            "url": window.location.href
          }},
          "potentialAction": {{
            "@type": "DownloadAction",
            "target": window.location.href,
            "encodingFormat": ["application/pdf", "audio/mpeg"]
          }}
        }}, null, 2);
      }}

      function showCoverModal(title, coverUrl) {{
        modalTitle.textContent = title;
        modalImage.src = coverUrl;
        modalImage.alt = 'Cover image for the book: ' + title;
        modal.classList.remove('hidden');
      }}

      modalClose.addEventListener('click', function() {{
        modal.classList.add('hidden');
      }});
      modal.addEventListener('click', function(e) {{
        if (e.target === modal) modal.classList.add('hidden');
      }});
      document.addEventListener('keydown', function(e) {{
        if (e.key === 'Escape') modal.classList.add('hidden');
      }});

      const na = '<span class="text-slate-400 italic text-xs font-bold">N/A</span>';

      function downloadCell(url, icon) {{
        if (!url) return na;
        return `<a class="inline-flex items-center gap-2 text-primary font-bold text-sm hover:underline" href="${{escapeHtml(url)}}" target="_blank" rel="noreferrer"><span class="material-symbols-outlined text-[18px]">${{icon}}</span>Download</a>`;
      }}

      function render() {{
        const rows = buildRows(filtered());

        document.querySelectorAll('.book-schema').forEach(el => el.remove());

        const cells = [];
        for (const row of rows) {{
          const schema = document.createElement('script');
          schema.type = 'application/ld+json';
          schema.className = 'book-schema';
          schema.textContent = bookSchema(row.title);
          document.body.appendChild(schema);

          const coverCell = row.cover_url
            ? `<button class="inline-flex items-center gap-2 text-primary font-bold text-sm hover:underline cover-btn" data-title="${{escapeHtml(row.title)}}" data-cover="${{escapeHtml(row.cover_url)}}" type="button"><span class="material-symbols-outlined text-[18px]">image</span>View</button>`
            : na;

          cells.push(
            `<tr class="hover:bg-slate-50 dark:hover:bg-slate-800/30 transition-colors">
              <td class="px-6 py-5 text-sm font-bold text-slate-900 dark:text-white">${{row.no}}</td>
              <td class="px-6 py-5 text-sm font-semibold text-slate-900 dark:text-white"><strong>${{escapeHtml(row.title)}}</strong></td>
              <td class="px-6 py-5">${{downloadCell(row.pdf_url, 'picture_as_pdf')}}</td>
              <td class="px-6 py-5">${{downloadCell(row.audio_url, 'headphones')}}</td>
              <td class="px-6 py-5">${{coverCell}}</td>
            </tr>`
          );
        }}
        tableBody.innerHTML = cells.join('');

        for (const el of tableBody.querySelectorAll('button.cover-btn')) {{
          el.addEventListener('click', function() {{
            showCoverModal(el.getAttribute('data-title'), el.getAttribute('data-cover'));
          }});
        }}

        resultsTotal.textContent = `${{rows.length}} BOOKS`;

        const arrow = state.sort.ascending ? '▲' : '▼';
        sortNo.querySelector('.sort-arrow').textContent = state.sort.column === 'no' ? arrow : '';
        sortTitle.querySelector('.sort-arrow').textContent = state.sort.column === 'title' ? arrow : '';
        sortNo.setAttribute('aria-sort', state.sort.column === 'no' ? (state.sort.ascending ? 'ascending' : 'descending') : 'none');
        sortTitle.setAttribute('aria-sort', state.sort.column === 'title' ? (state.sort.ascending ? 'ascending' : 'descending') : 'none');
      }}

      sortNo.addEventListener('click', function() {{ toggleSort('no'); }});
      sortTitle.addEventListener('click', function() {{ toggleSort('title'); }});

      searchEl.addEventListener('input', function() {{
        state.query = searchEl.value || '';
        render();
      }});

      render();
    }})();
  </script>
</body>
</html>"####,
    );

    html.into_bytes()
}

use audit_patterns::{builtin_definitions, PatternCatalog, PatternMatcher};
use std::collections::HashSet;

/// (pattern id, file path, snippet that must trigger it)
const POSITIVE: &[(&str, &str, &str)] = &[
    (
        "date-format-manual",
        "src/date.ts",
        "const s = d.getFullYear() + '-' + (d.getMonth() + 1);",
    ),
    (
        "relative-time-manual",
        "src/time.ts",
        "const mins = Math.floor((Date.now() - ts) / (1000 * 60));",
    ),
    (
        "date-arithmetic-manual",
        "src/time.js",
        "next.setDate(next.getDate() + 7);",
    ),
    (
        "email-regex-validation",
        "src/validate.ts",
        r"return /^[^\s@]+@[^\s@]+\.[^\s@]+$/.test(email);",
    ),
    (
        "manual-type-validation",
        "src/validate.ts",
        "if (typeof input.name !== 'string') {\n  throw new TypeError('name');\n}",
    ),
    (
        "form-state-manual",
        "src/Form.tsx",
        "const [errors, setErrors] = useState({});",
    ),
    (
        "fetch-retry-loop",
        "src/api.ts",
        "for (let attempt = 0; attempt < 3; attempt++) {\n  const res = await fetch(url);\n}",
    ),
    (
        "fetch-wrapper",
        "src/api.ts",
        "async function apiRequest(path, options) {\n  const res = await fetch(BASE + path, options);\n}",
    ),
    (
        "hardcoded-api-url",
        "src/users.js",
        "fetch('https://api.example.com/users')",
    ),
    (
        "fetch-in-effect",
        "src/Users.jsx",
        "useEffect(() => {\n  fetch('/api/users').then((r) => r.json());\n}, []);",
    ),
    (
        "manual-request-cache",
        "src/cache.ts",
        "const requestCache = new Map();",
    ),
    (
        "event-emitter-store",
        "src/store.ts",
        "const listeners = new Set();\nfunction setState(s) {\n  state = s;\n  listeners.forEach((l) => l(state));\n}",
    ),
    (
        "context-reducer-store",
        "src/store.tsx",
        "const Ctx = createContext(null);\nexport function Provider() {\n  const [s, d] = useReducer(reducer, init);\n}",
    ),
    (
        "debounce-manual",
        "src/input.ts",
        "clearTimeout(timer);\n    timer = setTimeout(() => fn(...args), wait);",
    ),
    (
        "throttle-manual",
        "src/scroll.ts",
        "if (Date.now() - lastCall < wait) return;",
    ),
    (
        "deep-clone-json",
        "src/clone.ts",
        "const copy = JSON.parse(JSON.stringify(obj));",
    ),
    (
        "deep-merge-manual",
        "src/merge.js",
        "export function deepMerge(a, b) {}",
    ),
    (
        "deep-equal-manual",
        "src/eq.js",
        "const deepEqual = (a, b) => a === b;",
    ),
    (
        "uuid-manual",
        "src/id.ts",
        "const id = Math.random().toString(36).substring(2, 9);",
    ),
    (
        "string-hash-manual",
        "src/hash.ts",
        "hash = ((hash << 5) - hash) + chr;",
    ),
    (
        "csv-parse-manual",
        "src/csv.ts",
        "text.split('\\n').map((line) => line.split(','))",
    ),
    (
        "query-string-manual",
        "src/qs.ts",
        "const q = location.search.substring(1);",
    ),
    (
        "markdown-regex-render",
        "src/md.ts",
        r"html = html.replace(/\*\*(.+?)\*\*/g, '<b>$1</b>');",
    ),
    (
        "python-argv-parse",
        "tools/run.py",
        "name = sys.argv[1]",
    ),
    (
        "classnames-manual",
        "src/Button.tsx",
        "<div className={[base, active && 'on'].filter(Boolean).join(' ')} />",
    ),
    (
        "currency-format-manual",
        "src/money.ts",
        r"return n.toString().replace(/\B(?=(\d{3})+(?!\d))/g, ',');",
    ),
    (
        "pluralization-manual",
        "src/Cart.tsx",
        "const label = count === 1 ? 'item' : 'items';",
    ),
    (
        "translation-dictionary",
        "src/i18n.ts",
        "const translations = {\n  en: {\n    hello: 'Hello',\n  },\n};",
    ),
    (
        "console-logger-wrapper",
        "src/log.ts",
        "const LOG_LEVELS = { debug: 0, info: 1, warn: 2 };",
    ),
    (
        "focus-trap-manual",
        "src/Modal.tsx",
        "el.querySelectorAll('button, [href], input, [tabindex]')",
    ),
    (
        "deep-relative-import",
        "src/pages/home/index.ts",
        "import config from '../../../config/app';",
    ),
    (
        "python-retry-loop",
        "client/fetch.py",
        "for attempt in range(3):\n    try:\n        r = requests.get(url)\n    except Exception:\n        pass",
    ),
];

/// Snippets that look similar but must stay silent for the given pattern
const NEGATIVE: &[(&str, &str, &str)] = &[
    ("deep-relative-import", "src/a.ts", "import theme from '../theme';"),
    ("deep-relative-import", "src/a.ts", "import x from '../../shared/x';"),
    ("fetch-wrapper", "src/a.ts", "async function load() {\n  await fetch('/x');\n}"),
    ("deep-clone-json", "src/a.ts", "JSON.parse(raw);"),
    ("pluralization-manual", "src/a.ts", "count === 2 ? 'a' : 'b'"),
    ("date-format-manual", "src/a.py", "d.getFullYear() + (d.getMonth() + 1)"),
];

fn ids_found(catalog: &PatternCatalog, path: &str, content: &str) -> HashSet<String> {
    PatternMatcher::new(catalog)
        .scan_file(path, content)
        .into_iter()
        .map(|d| d.pattern_category)
        .collect()
}

#[test]
fn every_builtin_pattern_has_a_positive_sample() {
    let sampled: HashSet<&str> = POSITIVE.iter().map(|(id, _, _)| *id).collect();
    for def in builtin_definitions() {
        assert!(sampled.contains(def.id.as_str()), "no sample for {}", def.id);
    }
}

#[test]
fn positive_samples_trigger_their_pattern() {
    let catalog = PatternCatalog::builtin().expect("catalog");
    for (id, path, content) in POSITIVE {
        let found = ids_found(&catalog, path, content);
        assert!(found.contains(*id), "{id} did not match {content:?}; got {found:?}");
    }
}

#[test]
fn negative_samples_stay_silent() {
    let catalog = PatternCatalog::builtin().expect("catalog");
    for (id, path, content) in NEGATIVE {
        let found = ids_found(&catalog, path, content);
        assert!(!found.contains(*id), "{id} unexpectedly matched {content:?}");
    }
}

#[test]
fn repeated_matches_produce_one_detection() {
    let catalog = PatternCatalog::builtin().expect("catalog");
    let content = "const a = JSON.parse(JSON.stringify(x));\nconst b = JSON.parse(JSON.stringify(y));\n";
    let found: Vec<_> = PatternMatcher::new(&catalog)
        .scan_file("src/a.ts", content)
        .into_iter()
        .filter(|d| d.pattern_category == "deep-clone-json")
        .collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].line_range.start, 1);
}

#[test]
fn large_input_without_matches_finishes() {
    let catalog = PatternCatalog::builtin().expect("catalog");
    let content = "for (let attempt = 0; attempt < 3; attempt++) {".repeat(2_000) + &"x".repeat(200_000);
    let found = ids_found(&catalog, "src/big.ts", &content);
    assert!(!found.contains("fetch-retry-loop"));
}

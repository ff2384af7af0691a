//! Human-facing demo page.
//!
//! A single static page with two controls: fire one compile, or
//! toggle a generator that fires one compile every 5 seconds.

/// The demo page served at `GET /`.
pub const DEMO_PAGE: &str = r#"<html>
  <head>
    <title>Compiler Demo</title>
    <script>
      let inFlight = 0
      async function compile() {
        ++inFlight
        const url = new URL('/compile', window.location.origin)
        try {
          const response = await fetch(url, {
            method: 'POST',
            headers: { Accept: 'application/json' },
            signal: AbortSignal.timeout(20000)
          })
          if (response.ok) {
            const body = await response.json()
            logResult('Success! ' + JSON.stringify(body))
          } else {
            logResult('request failed with status ' + response.status)
          }
        } catch (err) {
          if (err.name === 'AbortError' || err.name === 'TimeoutError') {
            logResult('request was aborted (probably took >20s and timed out)')
          } else {
            logResult(err.name + ': ' + err.message)
          }
        } finally {
          --inFlight
        }
      }

      let demandTestMs = 5000
      let demandTestInterval = null
      function toggleDemandTest() {
        if (demandTestInterval) {
          clearInterval(demandTestInterval)
          demandTestInterval = null
          document.querySelector('#demand-test').textContent = 'Generate Compiles'
          return
        }
        compile().catch(alert)
        demandTestInterval = setInterval(
          () => compile().catch(alert),
          demandTestMs
        )
        document.querySelector('#demand-test').textContent = 'Stop Generating Compiles'
      }

      function logResult(result) {
        const resultElement = document.createElement('p')
        if (inFlight > 0) result += ' (' + inFlight + ' requests were in flight)'
        resultElement.textContent = result
        document.querySelector('#output').append(resultElement)
      }
    </script>
  </head>
  <body>
    <h1>Compiler Demo</h1>
    <p><button onclick="compile().catch(alert)">Run a Simulated Compile</button></p>
    <p><button id="demand-test" onclick="toggleDemandTest()">Generate Compiles</button> (1 compile every 5s)</p>
    <h2>Output</h2>
    <pre id="output"></pre>
  </body>
</html>
"#;

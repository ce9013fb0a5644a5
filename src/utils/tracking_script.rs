//! Client-side script injected into HTML responses.

/// Script inserted before `</body>` of every HTML response.
///
/// On load it reports a page visit to `/api/seamlink/pageview`. Once the
/// DOM is ready it hooks every `a[href^="http"]`: a click cancels the
/// default navigation, reports the click to `/api/seamlink/track`, and then
/// opens the target in a new tab whether or not the report succeeded.
///
/// Payload fields match [`crate::domain::events::LinkClick`] and
/// [`crate::domain::events::PageVisit`].
pub const TRACKING_SCRIPT: &str = r#"
<script>
(function () {
  var report = function (path, url, referrer) {
    return fetch(path, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({
        url: url,
        referrer: referrer,
        userAgent: navigator.userAgent,
        timestamp: new Date().toISOString()
      })
    });
  };

  report('/api/seamlink/pageview', window.location.href, document.referrer || 'direct')
    .catch(function (err) { console.error('seamlink: pageview not reported', err); });

  var onClick = function (e) {
    e.preventDefault();
    var url = e.currentTarget.getAttribute('href');
    report('/api/seamlink/track', url, window.location.href)
      .then(function () { window.open(url, '_blank'); })
      .catch(function (err) {
        console.error('seamlink: click not reported', err);
        window.open(url, '_blank');
      });
  };

  document.addEventListener('DOMContentLoaded', function () {
    var links = document.querySelectorAll('a[href^="http"]');
    links.forEach(function (link) { link.addEventListener('click', onClick); });
  });
})();
</script>"#;

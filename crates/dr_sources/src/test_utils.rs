use axum::Router;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn atom_entry(id: &str, title: &str, published: &str) -> String {
    format!(
        r#"<entry>
    <id>http://arxiv.org/abs/{id}v1</id>
    <updated>{published}</updated>
    <published>{published}</published>
    <title>{title}</title>
    <summary>  Abstract of {id}.
    </summary>
    <author><name>Ada Lovelace</name></author>
    <link href="http://arxiv.org/abs/{id}v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/{id}v1" rel="related" type="application/pdf"/>
  </entry>"#
    )
}

pub fn atom_feed(entries: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <link href="http://arxiv.org/api/query" rel="self" type="application/atom+xml"/>
  <title type="html">ArXiv Query</title>
  <id>http://arxiv.org/api/test</id>
  <updated>2024-10-03T00:00:00-04:00</updated>
  {}
</feed>"#,
        entries.join("\n  ")
    )
}

pub fn rss_item(n: usize, pub_date: &str, description: &str) -> String {
    format!(
        r#"<item>
      <title>Story {n}</title>
      <link>https://news.example.com/story-{n}</link>
      <pubDate>{pub_date}</pubDate>
      <description><![CDATA[{description}]]></description>
    </item>"#
    )
}

pub fn rss_feed(items: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>AI News</title>
    <link>https://news.example.com</link>
    <description>Artificial intelligence coverage</description>
    {}
  </channel>
</rss>"#,
        items.join("\n    ")
    )
}
